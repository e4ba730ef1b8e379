//! A deme: one sub-population with tournament selection.

use rand::Rng;

use super::builder::BuildController;
use super::config::SearchConfig;
use super::factory::MemberFactory;
use super::member::Member;
use super::store::LocationStore;
use super::types::{Evaluator, Location, WORST_FITNESS};
use crate::error::SearchError;

/// A sub-population organized into fixed-size tournament groups.
///
/// Each generation the deme is evaluated, then updated: every group
/// drops its worst `prune_size` members, rebuilds them from the group
/// winner's best location, and advances the winner. Groups whose oldest
/// member exceeds `prune_age` are pruned whole; once such pruning leaves
/// a single group standing, the deme clears itself entirely so the
/// owning runner can replace it with a freshly seeded one.
#[derive(Debug, Clone)]
pub struct Deme {
    groups: Vec<Vec<Member>>,
    best_location: Location,
    best_fitness: u32,
    success_count: usize,
}

impl Deme {
    /// Builds a deme seeded from a fresh location requested from the
    /// build controller.
    pub fn new<R: Rng>(
        config: &SearchConfig,
        builder: &mut BuildController,
        store: &LocationStore,
        rng: &mut R,
    ) -> Result<Self, SearchError> {
        let best_location = builder.build(config, store, rng)?;
        let mut deme = Self {
            groups: Vec::new(),
            best_location,
            best_fitness: WORST_FITNESS,
            success_count: 0,
        };
        deme.initialise(config, store, rng);
        Ok(deme)
    }

    /// Fills the deme with `deme_size` members, rounded up to whole
    /// tournament groups, every group seeded from the deme's best
    /// location. One factory is drawn for the entire initial population.
    fn initialise<R: Rng>(&mut self, config: &SearchConfig, store: &LocationStore, rng: &mut R) {
        let factory = MemberFactory::choose(config, rng);
        let seed = self.best_location.clone();
        self.groups = (0..config.groups_per_deme())
            .map(|_| {
                (0..config.tournament_size)
                    .map(|_| factory.build(&seed, config, store, rng))
                    .collect()
            })
            .collect();
    }

    /// Evaluates every member, records each result in the store, counts
    /// zero-fitness successes, and recomputes the deme best.
    pub fn evaluate<E: Evaluator>(&mut self, evaluator: &mut E, store: &mut LocationStore) {
        for group in &mut self.groups {
            for member in group {
                let fitness = member.evaluate(evaluator);
                store.insert(member.current_location().to_vec(), fitness);
                if fitness == 0 {
                    self.success_count += 1;
                }
            }
        }
        // Minimum across all members; on ties the first encountered wins.
        if let Some(best) = self.groups.iter().flatten().min_by_key(|m| m.best_fitness()) {
            self.best_fitness = best.best_fitness();
            self.best_location = best.best_location().to_vec();
        }
    }

    /// Runs tournament replacement in every group, then age-prunes
    /// exhausted groups.
    pub fn update<R: Rng>(&mut self, config: &SearchConfig, store: &LocationStore, rng: &mut R) {
        let peers: Vec<Location> = self
            .groups
            .iter()
            .flatten()
            .map(|m| m.best_location().to_vec())
            .collect();

        for group in &mut self.groups {
            group.sort_by_key(Member::best_fitness);

            let keep = group.len().saturating_sub(config.prune_size);
            group.truncate(keep);

            let winner_best = group[0].best_location().to_vec();
            for _ in 0..config.prune_size {
                let factory = MemberFactory::choose(config, rng);
                group.push(factory.build(&winner_best, config, store, rng));
            }

            group[0].update(&peers, config, rng);
        }

        self.prune_aged(config);
    }

    /// Removes groups whose oldest member exceeds the configured age.
    /// When pruning leaves exactly one group, the whole deme is cleared.
    fn prune_aged(&mut self, config: &SearchConfig) {
        let before = self.groups.len();
        self.groups
            .retain(|group| group.iter().map(Member::age).max().unwrap_or(0) <= config.prune_age);

        if self.groups.len() < before && self.groups.len() == 1 {
            log::debug!("deme exhausted after age pruning, clearing remaining group");
            self.groups.clear();
        }
    }

    /// Best fitness across the deme's members so far.
    pub fn best_fitness(&self) -> u32 {
        self.best_fitness
    }

    /// Location that produced the deme's best fitness.
    pub fn best_location(&self) -> &[usize] {
        &self.best_location
    }

    /// Members that evaluated to zero fitness, cumulative over the
    /// deme's lifetime.
    pub fn success_count(&self) -> usize {
        self.success_count
    }

    /// Total members across all tournament groups.
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Whether every member has been pruned away.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The tournament groups.
    pub fn groups(&self) -> &[Vec<Member>] {
        &self.groups
    }

    #[cfg(test)]
    pub(crate) fn from_groups(groups: Vec<Vec<Member>>, best_location: Location) -> Self {
        Self {
            groups,
            best_location,
            best_fitness: WORST_FITNESS,
            success_count: 0,
        }
    }
}
