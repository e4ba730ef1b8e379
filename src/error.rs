//! Crate error type.

use thiserror::Error;

/// Errors produced by the search engine and its history-file tooling.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A configuration parameter failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The duplicate-avoiding location builder could not produce a fresh
    /// location within its retry ceiling.
    #[error("exhausted search space after {attempts} rejected locations")]
    ExhaustedSearchSpace {
        /// Number of rejected build attempts before giving up.
        attempts: usize,
    },

    /// An I/O failure while reading or writing a historical result file.
    ///
    /// A *missing* history file is not an error; loaders map it to an
    /// empty history instead.
    #[error("history file error: {0}")]
    Io(#[from] std::io::Error),

    /// A historical result file contained a cell that is not an integer.
    #[error("malformed history row at line {line}")]
    MalformedHistory {
        /// 1-based line number within the file.
        line: usize,
        /// The failed cell parse.
        #[source]
        source: std::num::ParseIntError,
    },
}
