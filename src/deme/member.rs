//! A single candidate and its mutation lifecycle.

use rand::Rng;

use super::config::SearchConfig;
use super::genetics;
use super::types::{Evaluator, Location, WORST_FITNESS};

/// How a member derives its next current location on [`Member::update`].
///
/// Crossover variants recombine first, then apply the member's configured
/// number of point mutations. Peer crossover receives the deme's member
/// best-locations as an explicit argument; members hold no reference to
/// their owning deme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationStrategy {
    /// Replace one random cell with a fresh symbol within its bound,
    /// repeated `mutation_count` times.
    Point,
    /// Pairwise transpositions of two random positions, repeated
    /// `mutation_count` times.
    Swap,
    /// Single cut-point crossover with a uniformly chosen peer's best
    /// location; falls back to point mutation when fewer than two peers
    /// exist.
    CrossoverPeer,
    /// Single cut-point crossover with a freshly generated random
    /// location.
    CrossoverRandom,
}

/// One candidate solution plus its search state.
///
/// Lifecycle: seeded by a [`MemberFactory`](super::MemberFactory), then
/// alternating [`evaluate`](Member::evaluate) and [`update`](Member::update)
/// until pruned from its deme. `best_fitness` only ever decreases.
#[derive(Debug, Clone)]
pub struct Member {
    strategy: MutationStrategy,
    mutation_count: usize,
    current: Location,
    best: Location,
    best_fitness: u32,
    age: usize,
}

impl Member {
    /// Seeds a member: applies `mutation_count` base mutation operations
    /// to `seed` to produce the initial current location.
    pub fn new<R: Rng>(
        seed: &[usize],
        strategy: MutationStrategy,
        mutation_count: usize,
        config: &SearchConfig,
        rng: &mut R,
    ) -> Self {
        let mut current = seed.to_vec();
        for _ in 0..mutation_count {
            current = base_mutation(&current, strategy, config, rng);
        }
        Self {
            strategy,
            mutation_count,
            best: current.clone(),
            current,
            best_fitness: WORST_FITNESS,
            age: 0,
        }
    }

    /// Scores the current location and improves the best-so-far
    /// bookkeeping on a strictly lower fitness. Returns the raw fitness.
    pub fn evaluate<E: Evaluator>(&mut self, evaluator: &mut E) -> u32 {
        let fitness = evaluator.evaluate(&self.current);
        if fitness < self.best_fitness {
            self.best_fitness = fitness;
            self.best = self.current.clone();
        }
        fitness
    }

    /// Advances the current location via the member's strategy and ages
    /// the member by one generation. Best bookkeeping is untouched until
    /// the next [`evaluate`](Member::evaluate).
    ///
    /// `peers` holds the best locations of the member's deme-mates,
    /// consumed by [`MutationStrategy::CrossoverPeer`].
    pub fn update<R: Rng>(&mut self, peers: &[Location], config: &SearchConfig, rng: &mut R) {
        self.current = match self.strategy {
            MutationStrategy::Point => self.mutated(self.current.clone(), config, rng),
            MutationStrategy::Swap => {
                genetics::switch_positions(&self.current, self.mutation_count, rng)
            }
            MutationStrategy::CrossoverPeer => {
                if peers.len() > 1 {
                    let mate = &peers[rng.random_range(0..peers.len())];
                    let crossed = genetics::crossover(&self.current, mate, rng);
                    self.mutated(crossed, config, rng)
                } else {
                    self.mutated(self.current.clone(), config, rng)
                }
            }
            MutationStrategy::CrossoverRandom => {
                let mate = genetics::random_location(&config.bounds, rng);
                let crossed = genetics::crossover(&self.current, &mate, rng);
                self.mutated(crossed, config, rng)
            }
        };
        self.age += 1;
    }

    fn mutated<R: Rng>(&self, mut location: Location, config: &SearchConfig, rng: &mut R) -> Location {
        for _ in 0..self.mutation_count {
            location = genetics::point_mutation(&location, &config.bounds, rng);
        }
        location
    }

    /// Best fitness seen so far ([`WORST_FITNESS`] before any evaluation).
    pub fn best_fitness(&self) -> u32 {
        self.best_fitness
    }

    /// Location that produced the best fitness.
    pub fn best_location(&self) -> &[usize] {
        &self.best
    }

    /// Location the next evaluation will score.
    pub fn current_location(&self) -> &[usize] {
        &self.current
    }

    /// Generations survived.
    pub fn age(&self) -> usize {
        self.age
    }

    /// The member's mutation strategy.
    pub fn strategy(&self) -> MutationStrategy {
        self.strategy
    }
}

fn base_mutation<R: Rng>(
    location: &[usize],
    strategy: MutationStrategy,
    config: &SearchConfig,
    rng: &mut R,
) -> Location {
    match strategy {
        MutationStrategy::Swap => genetics::switch_positions(location, 1, rng),
        _ => genetics::point_mutation(location, &config.bounds, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    struct FixedEvaluator(Vec<u32>);

    impl Evaluator for FixedEvaluator {
        fn evaluate(&mut self, _location: &[usize]) -> u32 {
            self.0.remove(0)
        }
    }

    fn config() -> SearchConfig {
        SearchConfig::new(8).with_seed(42)
    }

    #[test]
    fn test_new_applies_construction_mutations() {
        let config = config();
        let mut rng = create_rng(42);
        let seed = vec![0; 8];
        let member = Member::new(&seed, MutationStrategy::Point, 3, &config, &mut rng);
        assert_eq!(member.current_location().len(), 8);
        assert_eq!(member.age(), 0);
        assert_eq!(member.best_fitness(), WORST_FITNESS);
        // At most 3 cells can differ from the seed.
        let diff = seed
            .iter()
            .zip(member.current_location())
            .filter(|(a, b)| a != b)
            .count();
        assert!(diff <= 3);
    }

    #[test]
    fn test_evaluate_improves_best_monotonically() {
        let config = config();
        let mut rng = create_rng(42);
        let mut member = Member::new(&[0; 8], MutationStrategy::Point, 1, &config, &mut rng);
        let mut evaluator = FixedEvaluator(vec![7, 3, 5, 2, 9]);

        let mut best_seen = Vec::new();
        for _ in 0..5 {
            member.evaluate(&mut evaluator);
            best_seen.push(member.best_fitness());
            member.update(&[], &config, &mut rng);
        }
        assert_eq!(best_seen, vec![7, 3, 3, 2, 2]);
    }

    #[test]
    fn test_evaluate_keeps_best_location_of_best_fitness() {
        let config = config();
        let mut rng = create_rng(42);
        let mut member = Member::new(&[0; 8], MutationStrategy::Point, 1, &config, &mut rng);

        let mut evaluator = FixedEvaluator(vec![3]);
        member.evaluate(&mut evaluator);
        let best_at_3 = member.best_location().to_vec();

        // A worse evaluation after an update must not move the best.
        member.update(&[], &config, &mut rng);
        let mut evaluator = FixedEvaluator(vec![8]);
        member.evaluate(&mut evaluator);
        assert_eq!(member.best_location(), best_at_3.as_slice());
        assert_eq!(member.best_fitness(), 3);
    }

    #[test]
    fn test_update_increments_age_only() {
        let config = config();
        let mut rng = create_rng(42);
        let mut member = Member::new(&[0; 8], MutationStrategy::Point, 1, &config, &mut rng);
        let mut evaluator = FixedEvaluator(vec![5]);
        member.evaluate(&mut evaluator);

        for expected_age in 1..=4 {
            member.update(&[], &config, &mut rng);
            assert_eq!(member.age(), expected_age);
            assert_eq!(member.best_fitness(), 5, "update must not touch best");
        }
    }

    #[test]
    fn test_swap_strategy_preserves_multiset() {
        let config = config();
        let mut rng = create_rng(42);
        let seed = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let mut member = Member::new(&seed, MutationStrategy::Swap, 2, &config, &mut rng);
        for _ in 0..20 {
            member.update(&[], &config, &mut rng);
            let mut sorted = member.current_location().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, seed);
        }
    }

    #[test]
    fn test_crossover_peer_without_peers_falls_back() {
        let config = config();
        let mut rng = create_rng(42);
        let mut member =
            Member::new(&[0; 8], MutationStrategy::CrossoverPeer, 0, &config, &mut rng);
        // A single peer (itself) is not enough for crossover.
        member.update(&[vec![7; 8]], &config, &mut rng);
        assert_eq!(member.current_location(), &[0; 8], "must not cross with the lone peer");
    }

    #[test]
    fn test_crossover_peer_mixes_mate_material() {
        let config = config();
        let mut rng = create_rng(42);
        let peers = vec![vec![7; 8], vec![7; 8]];
        let mut saw_mate_material = false;
        for _ in 0..20 {
            let mut member =
                Member::new(&[0; 8], MutationStrategy::CrossoverPeer, 0, &config, &mut rng);
            member.update(&peers, &config, &mut rng);
            if member.current_location().contains(&7) {
                saw_mate_material = true;
                break;
            }
        }
        assert!(saw_mate_material);
    }
}
