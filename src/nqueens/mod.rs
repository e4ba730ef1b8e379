//! The n-Queens problem.
//!
//! A location encodes one queen per column; the cell value is the queen's
//! row. [`QueensEvaluator`] scores candidate boards by counting attacking
//! queen pairs and keeps every distinct perfect board it sees, including
//! the rotations and reflections of each — a zero-conflict board stays a
//! solution under every board symmetry, so each find is multiplied for
//! free.
//!
//! [`io`] reads and writes the flat result files
//! (`<dimension>output.txt`) that the history-biased location builders
//! consume.

pub mod io;

mod evaluation;

pub use evaluation::{attacking_pairs, reflect_x, reflect_y, rotate, QueensEvaluator};
