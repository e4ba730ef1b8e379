//! History-biased location builders.
//!
//! Both builders consume solution rows recorded by earlier runs on a
//! smaller problem dimension (see [`crate::nqueens::io`] for the file
//! format). With no history available they degrade to uniform random
//! generation.

use rand::Rng;

use super::config::SearchConfig;
use super::genetics;
use super::types::Location;

/// Samples each column of a new location proportionally to how often each
/// symbol appeared in that column across historical solutions.
///
/// The per-column histogram is built from rows of the smaller source
/// dimension, then rescaled up to the target dimension by spreading each
/// count over the neighbouring cells with ceiling-rounded linear weights.
/// Columns with an empty histogram fall back to a uniform draw.
#[derive(Debug, Clone)]
pub struct FrequencyBuilder {
    // chance_table[col] holds each symbol repeated by its (scaled) count.
    chance_table: Vec<Vec<usize>>,
}

impl FrequencyBuilder {
    /// Builds the sampling tables from historical rows of length
    /// `config.import_dimensions`. Rows of any other length are dropped.
    pub fn new(config: &SearchConfig, rows: &[Vec<usize>]) -> Self {
        let dimensions = config.dimensions;
        let lower = config.import_dimensions;
        let rows: Vec<&Vec<usize>> = rows.iter().filter(|r| r.len() == lower).collect();

        let cell_store = if rows.is_empty() || lower == 0 {
            // No history: every symbol equally likely in every column.
            vec![vec![1; dimensions]; dimensions]
        } else {
            let mut histogram = vec![vec![0u64; lower]; lower];
            for row in &rows {
                for (col, &cell) in row.iter().enumerate() {
                    if cell < lower {
                        histogram[col][cell] += 1;
                    }
                }
            }
            scale_to_fit(dimensions, lower, &histogram)
        };

        let chance_table = cell_store
            .iter()
            .map(|column| {
                let mut pool = Vec::new();
                for (symbol, &count) in column.iter().enumerate() {
                    for _ in 0..count {
                        pool.push(symbol);
                    }
                }
                pool
            })
            .collect();

        Self { chance_table }
    }

    /// Draws a full location, one weighted sample per column.
    pub fn build<R: Rng>(&self, config: &SearchConfig, rng: &mut R) -> Location {
        (0..config.dimensions)
            .map(|col| {
                let pool = &self.chance_table[col];
                if pool.is_empty() {
                    rng.random_range(0..config.dimensions)
                } else {
                    pool[rng.random_range(0..pool.len())]
                }
            })
            .collect()
    }
}

/// Spreads a `lower x lower` histogram over a `dimensions x dimensions`
/// table, weighting each count across the adjacent column/symbol cells.
///
/// Requires `lower < dimensions`, which configuration validation
/// guarantees.
fn scale_to_fit(dimensions: usize, lower: usize, histogram: &[Vec<u64>]) -> Vec<Vec<u64>> {
    let scale = lower as f64 / dimensions as f64;
    let one_over = 1.0 - scale;
    let mut scaled = vec![vec![0u64; dimensions]; dimensions];

    for x in 0..lower {
        for y in 0..lower {
            let value = histogram[x][y] as f64;
            let left = if y > 0 { scale * value } else { value };
            let right = if y < lower - 1 { one_over * value } else { value };
            scaled[x][y] += left.ceil() as u64;
            scaled[x + 1][y] += left.ceil() as u64;
            scaled[x][y + 1] += right.ceil() as u64;
            scaled[x + 1][y + 1] += right.ceil() as u64;
        }
    }

    scaled
}

/// Replays recorded solution rows in order, splicing each as a contiguous
/// block into a full-length background location at a random offset.
///
/// Rows cycle: once every row has been replayed, `completed_loop` turns
/// true and the cursor wraps to the first row. The background is a fresh
/// random location when `use_random` is configured, otherwise a cyclic
/// tiling of another (uniformly chosen) historical row.
#[derive(Debug, Clone)]
pub struct DuplicateBuilder {
    rows: Vec<Vec<usize>>,
    seed_length: usize,
    use_random: bool,
    requests: usize,
    completed_loop: bool,
}

impl DuplicateBuilder {
    /// Builds a replay cursor over rows of length
    /// `config.import_dimensions`. Rows of any other length are dropped.
    pub fn new(config: &SearchConfig, rows: Vec<Vec<usize>>) -> Self {
        let seed_length = config.import_dimensions;
        let rows: Vec<Vec<usize>> = rows
            .into_iter()
            .filter(|r| r.len() == seed_length)
            .collect();
        Self {
            rows,
            seed_length,
            use_random: config.use_random,
            requests: 0,
            completed_loop: false,
        }
    }

    /// Splices the next historical row into a background location.
    ///
    /// Falls back to a plain random location when no usable history
    /// exists.
    pub fn build<R: Rng>(&mut self, config: &SearchConfig, rng: &mut R) -> Location {
        if self.rows.is_empty() || self.seed_length == 0 {
            return genetics::random_location(&config.bounds, rng);
        }

        let row = self.advance();
        let seed = self.rows[row].clone();
        let background = if self.use_random {
            genetics::random_location(&config.bounds, rng)
        } else {
            let other = &self.rows[rng.random_range(0..self.rows.len())];
            (0..config.dimensions).map(|i| other[i % other.len()]).collect()
        };

        let offset = rng.random_range(0..config.dimensions - self.seed_length);
        (0..config.dimensions)
            .map(|x| {
                if x >= offset && x < offset + self.seed_length {
                    seed[x - offset]
                } else {
                    background[x]
                }
            })
            .collect()
    }

    /// Advances the replay cursor, wrapping (and flagging the completed
    /// loop) once every row has been served.
    fn advance(&mut self) -> usize {
        self.requests += 1;
        if self.requests >= self.rows.len() {
            self.completed_loop = true;
            self.requests = 0;
        }
        self.requests
    }

    /// Whether every historical row has been replayed at least once.
    pub fn completed_loop(&self) -> bool {
        self.completed_loop
    }

    /// Current position of the replay cursor.
    pub fn requests(&self) -> usize {
        self.requests
    }
}
