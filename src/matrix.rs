//! Augmented matrices over GF(1024) for the error-locator system
//!
//! The decoder hypothesises `t` errors and solves a `t × (t+1)` system built
//! from sliding windows of the syndrome vector. Systems are at most 7 × 8,
//! so rows live inline in a `SmallVec`.

use crate::field::Fe1024;
use smallvec::SmallVec;
use std::fmt;

/// Largest system the decoder builds
pub const MAX_ROWS: usize = 7;

type Row = SmallVec<[Fe1024; MAX_ROWS + 1]>;

/// No nonzero pivot in some column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingularMatrix {
    pub column: usize,
}

impl fmt::Display for SingularMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matrix is singular at column {}", self.column)
    }
}

impl std::error::Error for SingularMatrix {}

/// `rows × (rows + 1)` augmented matrix
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AugmentedMatrix {
    data: SmallVec<[Row; MAX_ROWS]>,
}

impl AugmentedMatrix {
    /// Hankel system for `rows` errors: row `j` is `syndromes[j..=j + rows]`
    pub fn from_syndromes(syndromes: &[Fe1024], rows: usize) -> Self {
        debug_assert!(2 * rows <= syndromes.len());
        let data = (0..rows)
            .map(|j| syndromes[j..=j + rows].iter().copied().collect())
            .collect();
        Self { data }
    }

    pub fn from_rows(rows: Vec<Vec<Fe1024>>) -> Self {
        Self {
            data: rows.into_iter().map(|r| r.into_iter().collect()).collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Fe1024 {
        self.data[row][col]
    }

    /// Right-hand column entry of `row`
    pub fn solution(&self, row: usize) -> Fe1024 {
        self.data[row][self.rows()]
    }

    /// Gauss-Jordan elimination in place
    ///
    /// On success the left block is the identity and the last column holds the
    /// solution. An empty matrix is trivially solved.
    pub fn solve(&mut self) -> Result<(), SingularMatrix> {
        let size = self.rows();

        for pivot_row in 0..size {
            // Find pivot
            let found = (pivot_row..size).find(|&r| !self.data[r][pivot_row].is_zero());
            let Some(search_row) = found else {
                return Err(SingularMatrix { column: pivot_row });
            };
            self.data.swap(pivot_row, search_row);

            // Scale pivot row
            let Some(pivot_log) = self.data[pivot_row][pivot_row].log() else {
                return Err(SingularMatrix { column: pivot_row });
            };
            for value in self.data[pivot_row].iter_mut() {
                *value = value.shift(-(pivot_log as i64));
            }

            // Eliminate column
            let pivot = self.data[pivot_row].clone();
            for (row, values) in self.data.iter_mut().enumerate() {
                if row == pivot_row {
                    continue;
                }
                if let Some(factor) = values[pivot_row].log() {
                    for (value, &p) in values.iter_mut().zip(pivot.iter()) {
                        *value += p.shift(factor as i64);
                    }
                }
            }
        }

        Ok(())
    }
}
