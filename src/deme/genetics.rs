//! Primitive location operators.
//!
//! The building blocks every member factory and location builder composes:
//! bounded random draws, single cut-point crossover, repeated pairwise
//! swaps, and bounded point mutation. All operate on plain `&[usize]`
//! locations and take the RNG last.

use rand::Rng;

use super::types::Location;

/// Draws a fresh location, each cell uniform in `0..bounds[i]`.
///
/// # Panics
/// Panics if `bounds` contains a zero bound (ruled out by
/// [`SearchConfig::validate`](super::SearchConfig::validate)).
pub fn random_location<R: Rng>(bounds: &[usize], rng: &mut R) -> Location {
    bounds.iter().map(|&b| rng.random_range(0..b)).collect()
}

/// Single cut-point recombination: `a[..cut] ++ b[cut..]`.
///
/// The cut point is uniform in `0..=len`, so either parent may be returned
/// whole.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn crossover<R: Rng>(a: &[usize], b: &[usize], rng: &mut R) -> Location {
    assert_eq!(a.len(), b.len(), "parents must have equal length");
    let cut = rng.random_range(0..=a.len());
    let mut child = Vec::with_capacity(a.len());
    child.extend_from_slice(&a[..cut]);
    child.extend_from_slice(&b[cut..]);
    child
}

/// Applies `count` pairwise transpositions of two uniform positions.
///
/// Positions are drawn with replacement, so a swap may be a no-op.
pub fn switch_positions<R: Rng>(location: &[usize], count: usize, rng: &mut R) -> Location {
    let mut out = location.to_vec();
    let n = out.len();
    if n < 2 {
        return out;
    }
    for _ in 0..count {
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n);
        out.swap(i, j);
    }
    out
}

/// Replaces one uniform cell with a fresh symbol within that cell's bound.
pub fn point_mutation<R: Rng>(location: &[usize], bounds: &[usize], rng: &mut R) -> Location {
    let mut out = location.to_vec();
    let index = rng.random_range(0..out.len());
    out[index] = rng.random_range(0..bounds[index]);
    out
}
