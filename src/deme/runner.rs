//! The per-generation driver loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;

use super::builder::BuildController;
use super::config::SearchConfig;
use super::controller::Deme;
use super::store::LocationStore;
use super::types::{Evaluator, Location, WORST_FITNESS};
use crate::error::SearchError;
use crate::random::create_rng;

/// Result of a search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Best location found across the entire run, if anything was
    /// evaluated.
    pub best_location: Option<Location>,

    /// Best fitness found ([`WORST_FITNESS`] if nothing was evaluated).
    pub best_fitness: u32,

    /// Generations executed by this run call.
    pub iterations: usize,

    /// Distinct zero-fitness locations recorded by the store.
    pub solutions: usize,

    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness after each generation.
    pub fitness_history: Vec<u32>,
}

/// Owns the location store, the seed-location build strategy, and the
/// demes; drives them one generation at a time.
///
/// # Usage
///
/// ```
/// use deme_search::deme::{SearchConfig, SearchRunner};
/// use deme_search::nqueens::QueensEvaluator;
///
/// let config = SearchConfig::new(6)
///     .with_total_demes(4)
///     .with_max_iterations(25)
///     .with_seed(7);
/// let mut runner = SearchRunner::new(config).unwrap();
/// let mut evaluator = QueensEvaluator::new();
/// let result = runner.run(&mut evaluator).unwrap();
/// assert_eq!(result.fitness_history.len(), result.iterations);
/// ```
pub struct SearchRunner {
    config: SearchConfig,
    store: LocationStore,
    builder: BuildController,
    demes: Vec<Deme>,
    rng: StdRng,
    iterations: usize,
    best_fitness: u32,
    best_location: Option<Location>,
}

impl SearchRunner {
    /// Creates a runner with the default build strategy and no historical
    /// rows (history-biased lanes degrade to random generation).
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        Self::with_history(config, Vec::new())
    }

    /// Creates a runner whose default distributing build strategy replays
    /// the given historical solution rows.
    pub fn with_history(
        config: SearchConfig,
        rows: Vec<Vec<usize>>,
    ) -> Result<Self, SearchError> {
        let builder = BuildController::distributing(&config, rows);
        Self::with_build_controller(config, builder)
    }

    /// Creates a runner with a fully custom build strategy.
    pub fn with_build_controller(
        config: SearchConfig,
        mut builder: BuildController,
    ) -> Result<Self, SearchError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let store = LocationStore::new(config.bounds.clone());
        let mut demes = Vec::with_capacity(config.total_demes);
        for _ in 0..config.total_demes {
            demes.push(Deme::new(&config, &mut builder, &store, &mut rng)?);
        }

        Ok(Self {
            config,
            store,
            builder,
            demes,
            rng,
            iterations: 0,
            best_fitness: WORST_FITNESS,
            best_location: None,
        })
    }

    /// Runs one generation: every deme evaluates and updates, then demes
    /// emptied by age pruning are replaced with freshly built ones seeded
    /// from the current store state.
    pub fn update<E: Evaluator>(&mut self, evaluator: &mut E) -> Result<(), SearchError> {
        for deme in &mut self.demes {
            deme.evaluate(evaluator, &mut self.store);
            deme.update(&self.config, &self.store, &mut self.rng);
        }

        for deme in &self.demes {
            if deme.best_fitness() < self.best_fitness {
                self.best_fitness = deme.best_fitness();
                self.best_location = Some(deme.best_location().to_vec());
            }
        }

        let mut replaced = 0;
        for deme in &mut self.demes {
            if deme.is_empty() {
                *deme = Deme::new(&self.config, &mut self.builder, &self.store, &mut self.rng)?;
                replaced += 1;
            }
        }
        if replaced > 0 {
            log::debug!("replaced {replaced} exhausted demes at iteration {}", self.iterations);
        }

        self.iterations += 1;
        Ok(())
    }

    /// Repeats [`update`](Self::update) until a stopping condition is
    /// met.
    pub fn run<E: Evaluator>(&mut self, evaluator: &mut E) -> Result<SearchResult, SearchError> {
        self.run_with_cancel(evaluator, None)
    }

    /// Runs with an optional cancellation token. When the flag is set the
    /// loop stops at the next generation boundary and returns the best
    /// found so far.
    pub fn run_with_cancel<E: Evaluator>(
        &mut self,
        evaluator: &mut E,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult, SearchError> {
        let mut fitness_history = Vec::new();
        let mut iterations = 0;
        let mut stagnation = 0;
        let mut previous_solutions = self.store.solutions();
        let mut stagnated = false;
        let mut cancelled = false;

        for _ in 0..self.config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            self.update(evaluator)?;
            iterations += 1;
            fitness_history.push(self.best_fitness);

            let solutions = self.store.solutions();
            if solutions == previous_solutions {
                stagnation += 1;
            } else {
                stagnation = 0;
            }
            previous_solutions = solutions;

            if self.config.target_solutions > 0 && solutions >= self.config.target_solutions {
                break;
            }
            if self.config.stagnation_limit > 0 && stagnation >= self.config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        Ok(SearchResult {
            best_location: self.best_location.clone(),
            best_fitness: self.best_fitness,
            iterations,
            solutions: self.store.solutions(),
            stagnated,
            cancelled,
            fitness_history,
        })
    }

    /// The shared location store.
    pub fn store(&self) -> &LocationStore {
        &self.store
    }

    /// The current demes.
    pub fn demes(&self) -> &[Deme] {
        &self.demes
    }

    /// Generations executed since construction.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Best fitness found so far ([`WORST_FITNESS`] before the first
    /// generation).
    pub fn best_fitness(&self) -> u32 {
        self.best_fitness
    }

    /// Best location found so far.
    pub fn best_location(&self) -> Option<&[usize]> {
        self.best_location.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scores a board by the sum of its cells.
    struct SumEvaluator;

    impl Evaluator for SumEvaluator {
        fn evaluate(&mut self, location: &[usize]) -> u32 {
            location.iter().sum::<usize>() as u32
        }
    }

    /// Never produces a perfect score.
    struct HopelessEvaluator;

    impl Evaluator for HopelessEvaluator {
        fn evaluate(&mut self, _location: &[usize]) -> u32 {
            1
        }
    }

    fn config() -> SearchConfig {
        SearchConfig::new(6)
            .with_total_demes(3)
            .with_tournament_size(2)
            .with_prune_size(1)
            .with_max_iterations(30)
            .with_seed(42)
    }

    #[test]
    fn test_update_keeps_deme_count_constant() {
        let mut runner = SearchRunner::new(config().with_prune_age(1)).unwrap();
        for _ in 0..10 {
            runner.update(&mut SumEvaluator).unwrap();
            assert_eq!(runner.demes().len(), 3);
            assert!(runner.demes().iter().all(|d| !d.is_empty()));
        }
        assert_eq!(runner.iterations(), 10);
    }

    #[test]
    fn test_run_stops_at_max_iterations() {
        let mut runner = SearchRunner::new(config()).unwrap();
        let result = runner.run(&mut HopelessEvaluator).unwrap();
        assert_eq!(result.iterations, 30);
        assert!(!result.stagnated);
        assert!(!result.cancelled);
        assert_eq!(result.solutions, 0);
        assert_eq!(result.best_fitness, 1);
    }

    #[test]
    fn test_run_stops_on_stagnation() {
        let mut runner = SearchRunner::new(config().with_stagnation_limit(5)).unwrap();
        let result = runner.run(&mut HopelessEvaluator).unwrap();
        assert!(result.stagnated);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn test_run_stops_on_target_solutions() {
        struct ZeroEvaluator;
        impl Evaluator for ZeroEvaluator {
            fn evaluate(&mut self, _location: &[usize]) -> u32 {
                0
            }
        }

        let mut runner = SearchRunner::new(config().with_target_solutions(1)).unwrap();
        let result = runner.run(&mut ZeroEvaluator).unwrap();
        assert_eq!(result.iterations, 1);
        assert!(result.solutions >= 1);
        assert_eq!(result.best_fitness, 0);
    }

    #[test]
    fn test_run_respects_preset_cancellation() {
        let mut runner = SearchRunner::new(config()).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let result = runner.run_with_cancel(&mut SumEvaluator, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert!(result.best_location.is_none());
    }

    #[test]
    fn test_best_fitness_non_increasing_across_generations() {
        let mut runner = SearchRunner::new(config().with_max_iterations(50)).unwrap();
        let result = runner.run(&mut SumEvaluator).unwrap();
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best fitness regressed: {} -> {}",
                window[0],
                window[1]
            );
        }
        assert!(result.best_location.is_some());
    }

    #[test]
    fn test_queens_search_progresses() {
        use crate::nqueens::QueensEvaluator;

        // One deme of eight, pairwise tournaments: the classic small
        // setup. Convergence to zero is stochastic, so the assertion is
        // progress, not a generation count.
        let config = SearchConfig::new(8)
            .with_total_demes(1)
            .with_deme_size(8)
            .with_tournament_size(2)
            .with_prune_size(1)
            .with_max_iterations(500)
            .with_seed(42);
        let mut runner = SearchRunner::new(config).unwrap();
        let mut evaluator = QueensEvaluator::new();
        let result = runner.run(&mut evaluator).unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
        let first = *result.fitness_history.first().unwrap();
        let last = *result.fitness_history.last().unwrap();
        assert!(last <= first);
        assert!(last < WORST_FITNESS);
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let run = || {
            let mut runner = SearchRunner::new(config()).unwrap();
            runner.run(&mut SumEvaluator).unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.best_location, b.best_location);
        assert_eq!(a.fitness_history, b.fitness_history);
    }
}
