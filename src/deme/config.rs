//! Run configuration.
//!
//! [`SearchConfig`] holds every parameter of a run. It is created once,
//! validated up front, and then shared read-only by all components.

use super::factory::MemberFactory;
use crate::error::SearchError;

/// Configuration for a deme search run.
///
/// # Defaults
///
/// ```
/// use deme_search::deme::SearchConfig;
///
/// let config = SearchConfig::new(8);
/// assert_eq!(config.total_demes, 80);
/// assert_eq!(config.deme_size, 8);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use deme_search::deme::SearchConfig;
///
/// let config = SearchConfig::new(32)
///     .with_prune_age(65)
///     .with_mutation_count(2)
///     .with_distribution_bias([60, 80, 95])
///     .with_tournament_size(3)
///     .with_prune_size(2)
///     .with_import_dimensions(16)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Problem dimension: cells per location, symbols per cell alphabet.
    pub dimensions: usize,

    /// Per-cell exclusive upper bound for symbol draws.
    ///
    /// Defaults to `dimensions` for every cell.
    pub bounds: Vec<usize>,

    /// Tournament groups whose oldest member exceeds this age are pruned
    /// from their deme.
    pub prune_age: usize,

    /// Mutation operations applied when a factory builds a member with a
    /// configured (rather than randomized) mutation count.
    pub mutation_count: usize,

    /// Cumulative thresholds `[b0, b1, b2]` steering the distributing
    /// location builder: a draw in `[0, b2]` below `b0` selects the
    /// duplicate-replay lane, below `b0 + b1` the crossover lane, and the
    /// generic-random lane otherwise.
    pub distribution_bias: [u32; 3],

    /// Members per tournament group.
    pub tournament_size: usize,

    /// Members removed from the bottom of each tournament group per
    /// generation. Must stay below `tournament_size` so the group winner
    /// always survives.
    pub prune_size: usize,

    /// Dimension of the historical result file feeding the history-biased
    /// builders. Must be smaller than `dimensions`.
    pub import_dimensions: usize,

    /// Background fill for the duplicate-replay builder: `true` draws a
    /// fresh random location, `false` tiles another historical row.
    pub use_random: bool,

    /// Bias decay cadence: every `request_mod` build requests the
    /// distributing builder may nudge its bias triple.
    pub request_mod: usize,

    /// Floor below which the duplicate-replay bias is never decayed.
    pub bias_min: u32,

    /// Number of demes held by the runner. Defaults to `dimensions * 10`.
    pub total_demes: usize,

    /// Members per deme (rounded up to whole tournament groups).
    /// Defaults to `dimensions`.
    pub deme_size: usize,

    /// Factory pool demes draw from when rebuilding pruned members.
    pub member_factories: Vec<MemberFactory>,

    /// Maximum number of generations the run loop executes.
    pub max_iterations: usize,

    /// Stop once the store has recorded this many distinct solutions.
    ///
    /// Set to 0 to disable.
    pub target_solutions: usize,

    /// Stop after this many consecutive generations without a new
    /// solution. Set to 0 to disable.
    pub stagnation_limit: usize,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Creates a configuration for the given problem dimension with the
    /// conventional defaults.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            bounds: vec![dimensions; dimensions],
            prune_age: dimensions.saturating_mul(dimensions).max(1),
            mutation_count: 2,
            distribution_bias: [60, 80, 95],
            tournament_size: 3,
            prune_size: 2,
            import_dimensions: dimensions.saturating_sub(1),
            use_random: false,
            request_mod: (dimensions.saturating_mul(15) / 2).max(1),
            bias_min: 40,
            total_demes: dimensions.saturating_mul(10).max(1),
            deme_size: dimensions.max(1),
            member_factories: vec![
                MemberFactory::Plain,
                MemberFactory::RandomMutation,
                MemberFactory::Genetic,
            ],
            max_iterations: 10_000,
            target_solutions: 0,
            stagnation_limit: 0,
            seed: None,
        }
    }

    /// Sets the per-cell bound table.
    pub fn with_bounds(mut self, bounds: Vec<usize>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the tournament-group age threshold.
    pub fn with_prune_age(mut self, age: usize) -> Self {
        self.prune_age = age;
        self
    }

    /// Sets the configured mutation count.
    pub fn with_mutation_count(mut self, count: usize) -> Self {
        self.mutation_count = count;
        self
    }

    /// Sets the distributing builder's bias triple.
    pub fn with_distribution_bias(mut self, bias: [u32; 3]) -> Self {
        self.distribution_bias = bias;
        self
    }

    /// Sets the tournament group size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets how many members are pruned per group per generation.
    pub fn with_prune_size(mut self, size: usize) -> Self {
        self.prune_size = size;
        self
    }

    /// Sets the historical source dimension.
    pub fn with_import_dimensions(mut self, dimensions: usize) -> Self {
        self.import_dimensions = dimensions;
        self
    }

    /// Selects the duplicate-replay background fill.
    pub fn with_use_random(mut self, use_random: bool) -> Self {
        self.use_random = use_random;
        self
    }

    /// Sets the bias decay cadence.
    pub fn with_request_mod(mut self, request_mod: usize) -> Self {
        self.request_mod = request_mod;
        self
    }

    /// Sets the bias decay floor.
    pub fn with_bias_min(mut self, bias_min: u32) -> Self {
        self.bias_min = bias_min;
        self
    }

    /// Sets the deme count.
    pub fn with_total_demes(mut self, total: usize) -> Self {
        self.total_demes = total;
        self
    }

    /// Sets the deme size.
    pub fn with_deme_size(mut self, size: usize) -> Self {
        self.deme_size = size;
        self
    }

    /// Sets the member-factory pool.
    pub fn with_member_factories(mut self, factories: Vec<MemberFactory>) -> Self {
        self.member_factories = factories;
        self
    }

    /// Sets the maximum generation count.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the solution-count stopping condition (0 to disable).
    pub fn with_target_solutions(mut self, target: usize) -> Self {
        self.target_solutions = target;
        self
    }

    /// Sets the stagnation stopping condition (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.dimensions == 0 {
            return Err(invalid("dimensions must be at least 1"));
        }
        if self.bounds.len() != self.dimensions {
            return Err(invalid(format!(
                "bounds table has {} entries for {} dimensions",
                self.bounds.len(),
                self.dimensions
            )));
        }
        if self.bounds.iter().any(|&b| b == 0) {
            return Err(invalid("every cell bound must be at least 1"));
        }
        if self.tournament_size == 0 {
            return Err(invalid("tournament_size must be at least 1"));
        }
        if self.prune_size >= self.tournament_size {
            return Err(invalid(format!(
                "prune_size {} would empty tournament groups of size {}",
                self.prune_size, self.tournament_size
            )));
        }
        if self.deme_size == 0 {
            return Err(invalid("deme_size must be at least 1"));
        }
        if self.total_demes == 0 {
            return Err(invalid("total_demes must be at least 1"));
        }
        if self.import_dimensions >= self.dimensions {
            return Err(invalid(format!(
                "import_dimensions {} must be smaller than dimensions {}",
                self.import_dimensions, self.dimensions
            )));
        }
        if self.request_mod == 0 {
            return Err(invalid("request_mod must be at least 1"));
        }
        if self.member_factories.is_empty() {
            return Err(invalid("member_factories must not be empty"));
        }
        if self.max_iterations == 0 {
            return Err(invalid("max_iterations must be at least 1"));
        }
        Ok(())
    }

    /// Number of tournament groups a deme of `deme_size` is built with.
    pub(crate) fn groups_per_deme(&self) -> usize {
        self.deme_size.div_ceil(self.tournament_size)
    }
}

fn invalid(message: impl Into<String>) -> SearchError {
    SearchError::InvalidConfig(message.into())
}
