//! Deduplicating registry of tried locations.

use std::collections::HashMap;

use rand::Rng;

use super::genetics;
use super::types::Location;

/// Registry of every location the run has evaluated, keyed by the location
/// itself. First write wins; entries are never removed.
///
/// Zero-fitness inserts additionally feed a per-column symbol histogram and
/// a distinct-solution counter, which the history-biased builders and the
/// run loop's stopping conditions consume.
#[derive(Debug, Clone)]
pub struct LocationStore {
    bounds: Vec<usize>,
    entries: HashMap<Location, u32>,
    // Insertion order, for O(1) uniform sampling over the key set.
    locations: Vec<Location>,
    cell_counts: Vec<Vec<u64>>,
    solutions: usize,
}

impl LocationStore {
    /// Creates an empty store for locations drawn from `bounds`.
    pub fn new(bounds: Vec<usize>) -> Self {
        let dimensions = bounds.len();
        Self {
            bounds,
            entries: HashMap::new(),
            locations: Vec::new(),
            cell_counts: vec![vec![0; dimensions]; dimensions],
            solutions: 0,
        }
    }

    /// Records `location -> fitness` if the location is not already
    /// present. Duplicate inserts are silently ignored.
    pub fn insert(&mut self, location: Location, fitness: u32) {
        if self.entries.contains_key(&location) {
            return;
        }
        if fitness == 0 {
            self.solutions += 1;
            for (col, &cell) in location.iter().enumerate() {
                if let Some(count) = self.cell_counts[col].get_mut(cell) {
                    *count += 1;
                }
            }
        }
        self.locations.push(location.clone());
        self.entries.insert(location, fitness);
    }

    /// Returns a uniformly chosen previously inserted location, or a fresh
    /// random one when the store is empty.
    pub fn select_at_random<R: Rng>(&self, rng: &mut R) -> Location {
        if self.locations.is_empty() {
            return genetics::random_location(&self.bounds, rng);
        }
        let index = rng.random_range(0..self.locations.len());
        self.locations[index].clone()
    }

    /// Fitness recorded for `location`, if any.
    pub fn fitness(&self, location: &[usize]) -> Option<u32> {
        self.entries.get(location).copied()
    }

    /// Whether `location` has been recorded.
    pub fn contains(&self, location: &[usize]) -> bool {
        self.entries.contains_key(location)
    }

    /// Number of distinct recorded locations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no location has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct zero-fitness locations recorded.
    pub fn solutions(&self) -> usize {
        self.solutions
    }

    /// Per-column symbol histogram over recorded solutions:
    /// `cell_counts()[col][symbol]`.
    pub fn cell_counts(&self) -> &[Vec<u64>] {
        &self.cell_counts
    }
}
