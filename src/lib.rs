//! Deme-based evolutionary search framework.
//!
//! Implements a genetic algorithm whose population is partitioned into
//! sub-populations ("demes"), each running its own tournament-based
//! selection and replacement, together with a complete n-Queens problem
//! module:
//!
//! - **Deme engine** ([`deme`]): members, tournament groups, pluggable
//!   member factories and seed-location builders, a duplicate-free
//!   location store, and the per-generation run loop.
//! - **n-Queens** ([`nqueens`]): an attacking-pair board evaluator with
//!   rotation/reflection bookkeeping, plus the historical result file
//!   format consumed by the history-biased location builders.
//!
//! # Architecture
//!
//! The engine only depends on the [`deme::Evaluator`] contract — a score
//! per candidate location, lower is better, `0` is a perfect solution —
//! so any constraint-satisfaction problem encodable as a bounded symbol
//! sequence can be plugged in. The n-Queens module is one such problem.
//!
//! # Example
//!
//! ```
//! use deme_search::deme::{SearchConfig, SearchRunner};
//! use deme_search::nqueens::QueensEvaluator;
//!
//! let config = SearchConfig::new(6)
//!     .with_total_demes(4)
//!     .with_max_iterations(50)
//!     .with_seed(42);
//! let mut evaluator = QueensEvaluator::new();
//! let mut runner = SearchRunner::new(config).unwrap();
//! let result = runner.run(&mut evaluator).unwrap();
//! assert!(result.iterations <= 50);
//! ```

pub mod deme;
mod error;
pub mod nqueens;
pub mod random;

pub use error::SearchError;
