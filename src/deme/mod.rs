//! Deme-based genetic search engine.
//!
//! The population is split into demes — small sub-populations organized
//! into fixed-size tournament groups. Each generation every deme evaluates
//! its members against an external [`Evaluator`], prunes the worst of each
//! tournament group, rebuilds the pruned slots from the group winner's best
//! location, and advances the winner. Demes whose tournament groups age out
//! are cleared and replaced with freshly seeded ones, so exploration never
//! stalls on an exhausted lineage.
//!
//! # Key Types
//!
//! - [`SearchConfig`]: run parameters (builder pattern, validated up front)
//! - [`SearchRunner`]: owns store, builders and demes; drives generations
//! - [`Deme`]: one sub-population with tournament selection
//! - [`Member`]: one candidate plus its mutation strategy and best-so-far
//! - [`MemberFactory`]: strategies for rebuilding pruned members
//! - [`LocationBuilder`] / [`BuildController`]: strategies for brand-new
//!   seed locations, including history-biased ones
//! - [`LocationStore`]: deduplicating registry of every tried location
//!
//! # Submodules
//!
//! - [`genetics`]: primitive location operators (random draw, crossover,
//!   pairwise swaps, point mutation)

mod builder;
mod config;
mod controller;
mod factory;
pub mod genetics;
mod history;
mod member;
mod runner;
mod store;
mod types;

pub use builder::{BuildController, DistributingBuilder, LocationBuilder, UniqueBuilder};
pub use config::SearchConfig;
pub use controller::Deme;
pub use factory::MemberFactory;
pub use history::{DuplicateBuilder, FrequencyBuilder};
pub use member::{Member, MutationStrategy};
pub use runner::{SearchResult, SearchRunner};
pub use store::LocationStore;
pub use types::{Evaluator, Location, WORST_FITNESS};
