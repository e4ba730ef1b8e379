//! Seed-location build strategies.
//!
//! Location builders produce brand-new locations that are not derived from
//! any particular member — they seed whole demes and replace exhausted
//! ones. [`BuildController`] owns a pool of builders and picks one
//! uniformly per request.

use std::collections::HashSet;

use rand::Rng;

use super::config::SearchConfig;
use super::genetics;
use super::history::{DuplicateBuilder, FrequencyBuilder};
use super::store::LocationStore;
use super::types::Location;
use crate::error::SearchError;

/// Retry ceiling for the duplicate-avoiding decorator. The original
/// retried forever; a bounded loop turns search-space exhaustion into a
/// reportable error instead of a hang.
const MAX_UNIQUE_ATTEMPTS: usize = 10_000;

/// A strategy for building brand-new seed locations.
#[derive(Debug, Clone)]
pub enum LocationBuilder {
    /// Per-cell uniform draw within the bound table.
    Random,
    /// Starts from a random stored location (even odds, store permitting)
    /// or a fresh random one, then applies `dimensions / 2` pairwise
    /// swaps.
    Crossover,
    /// Historical-frequency sampling (see [`FrequencyBuilder`]).
    Frequency(FrequencyBuilder),
    /// Historical row replay with block splicing (see
    /// [`DuplicateBuilder`]).
    Duplicate(DuplicateBuilder),
    /// Adaptive three-way routing between replay, crossover, and random
    /// lanes (see [`DistributingBuilder`]).
    Distributing(Box<DistributingBuilder>),
    /// Duplicate-avoiding decorator around any other builder (see
    /// [`UniqueBuilder`]).
    Unique(Box<UniqueBuilder>),
}

impl LocationBuilder {
    /// A frequency builder over historical rows.
    pub fn frequency(config: &SearchConfig, rows: &[Vec<usize>]) -> Self {
        LocationBuilder::Frequency(FrequencyBuilder::new(config, rows))
    }

    /// A duplicate-replay builder over historical rows.
    pub fn duplicate(config: &SearchConfig, rows: Vec<Vec<usize>>) -> Self {
        LocationBuilder::Duplicate(DuplicateBuilder::new(config, rows))
    }

    /// A distributing builder over historical rows.
    pub fn distributing(config: &SearchConfig, rows: Vec<Vec<usize>>) -> Self {
        LocationBuilder::Distributing(Box::new(DistributingBuilder::new(config, rows)))
    }

    /// Wraps `inner` in the duplicate-avoiding decorator.
    pub fn unique(inner: LocationBuilder) -> Self {
        LocationBuilder::Unique(Box::new(UniqueBuilder::new(inner)))
    }

    /// Produces one location.
    pub fn build<R: Rng>(
        &mut self,
        config: &SearchConfig,
        store: &LocationStore,
        rng: &mut R,
    ) -> Result<Location, SearchError> {
        match self {
            LocationBuilder::Random => Ok(genetics::random_location(&config.bounds, rng)),
            LocationBuilder::Crossover => Ok(crossover_location(config, store, rng)),
            LocationBuilder::Frequency(builder) => Ok(builder.build(config, rng)),
            LocationBuilder::Duplicate(builder) => Ok(builder.build(config, rng)),
            LocationBuilder::Distributing(builder) => builder.build(config, store, rng),
            LocationBuilder::Unique(builder) => builder.build(config, store, rng),
        }
    }
}

/// The crossover lane: perturb a known-good or random location with
/// `dimensions / 2` pairwise swaps.
fn crossover_location<R: Rng>(
    config: &SearchConfig,
    store: &LocationStore,
    rng: &mut R,
) -> Location {
    let base = if store.len() > 1 && rng.random_bool(0.5) {
        store.select_at_random(rng)
    } else {
        genetics::random_location(&config.bounds, rng)
    };
    genetics::switch_positions(&base, config.dimensions / 2, rng)
}

/// Routes build requests across duplicate-replay, crossover, and generic
/// random lanes according to a three-way cumulative bias.
///
/// The builder owns a private copy of the configured bias triple. Every
/// `request_mod` requests — once the replay builder has served every
/// historical row and while the replay bias sits above `bias_min` — the
/// bias is nudged away from replay (`b0 -= 2`, `b1 -= 1`), annealing the
/// run from history exploitation towards exploration.
#[derive(Debug, Clone)]
pub struct DistributingBuilder {
    duplicate: DuplicateBuilder,
    bias: [u32; 3],
    requests: usize,
}

impl DistributingBuilder {
    /// Creates the three-lane builder over historical rows.
    pub fn new(config: &SearchConfig, rows: Vec<Vec<usize>>) -> Self {
        Self {
            duplicate: DuplicateBuilder::new(config, rows),
            bias: config.distribution_bias,
            requests: 0,
        }
    }

    /// Produces one location through the currently biased lane.
    pub fn build<R: Rng>(
        &mut self,
        config: &SearchConfig,
        store: &LocationStore,
        rng: &mut R,
    ) -> Result<Location, SearchError> {
        self.requests += 1;
        if self.duplicate.completed_loop()
            && self.requests % config.request_mod == 0
            && self.bias[0] > config.bias_min
        {
            self.bias[0] = self.bias[0].saturating_sub(2);
            self.bias[1] = self.bias[1].saturating_sub(1);
            log::trace!("distribution bias decayed to {:?}", self.bias);
        }

        let draw = rng.random_range(0..=self.bias[2]);
        if draw < self.bias[0] {
            return Ok(self.duplicate.build(config, rng));
        }
        if draw < self.bias[0] + self.bias[1] {
            return Ok(crossover_location(config, store, rng));
        }
        Ok(genetics::random_location(&config.bounds, rng))
    }

    /// Current bias triple.
    pub fn bias(&self) -> [u32; 3] {
        self.bias
    }

    /// The replay lane, for loop-completion inspection.
    pub fn duplicate(&self) -> &DuplicateBuilder {
        &self.duplicate
    }
}

/// Decorator rejecting locations already produced earlier in the run.
///
/// Retries the inner builder until it yields an unseen location, up to a
/// fixed ceiling, then fails with
/// [`SearchError::ExhaustedSearchSpace`].
#[derive(Debug, Clone)]
pub struct UniqueBuilder {
    inner: LocationBuilder,
    built: HashSet<Location>,
    rejected: usize,
}

impl UniqueBuilder {
    /// Wraps `inner`.
    pub fn new(inner: LocationBuilder) -> Self {
        Self {
            inner,
            built: HashSet::new(),
            rejected: 0,
        }
    }

    /// Produces one location never produced before by this decorator.
    pub fn build<R: Rng>(
        &mut self,
        config: &SearchConfig,
        store: &LocationStore,
        rng: &mut R,
    ) -> Result<Location, SearchError> {
        for _ in 0..MAX_UNIQUE_ATTEMPTS {
            let location = self.inner.build(config, store, rng)?;
            if self.built.insert(location.clone()) {
                return Ok(location);
            }
            self.rejected += 1;
        }
        Err(SearchError::ExhaustedSearchSpace {
            attempts: MAX_UNIQUE_ATTEMPTS,
        })
    }

    /// Total build attempts rejected as duplicates.
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

/// Uniform-choice dispatcher over a pool of location builders.
#[derive(Debug, Clone)]
pub struct BuildController {
    builders: Vec<LocationBuilder>,
}

impl BuildController {
    /// Creates a controller over `builders`.
    ///
    /// # Panics
    /// Panics if `builders` is empty.
    pub fn new(builders: Vec<LocationBuilder>) -> Self {
        assert!(!builders.is_empty(), "builder pool must not be empty");
        Self { builders }
    }

    /// The conventional default strategy: a single distributing builder
    /// over the given historical rows.
    pub fn distributing(config: &SearchConfig, rows: Vec<Vec<usize>>) -> Self {
        Self::new(vec![LocationBuilder::distributing(config, rows)])
    }

    /// Produces one location via a uniformly chosen builder.
    pub fn build<R: Rng>(
        &mut self,
        config: &SearchConfig,
        store: &LocationStore,
        rng: &mut R,
    ) -> Result<Location, SearchError> {
        let index = rng.random_range(0..self.builders.len());
        self.builders[index].build(config, store, rng)
    }
}
