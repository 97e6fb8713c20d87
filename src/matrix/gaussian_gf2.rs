// src/matrix/gaussian_gf2.rs

use log::debug;

/// Gaussian elimination over GF(2) that reports every non-trivial linear
/// dependency among the input rows.
///
/// Each row is augmented with an identity block of width = number of rows,
/// so that after forward elimination a zeroed matrix portion carries, in
/// its suffix, exactly which original rows XOR to the zero vector.
pub struct GaussianGf2 {
    rows: usize,
    cols: usize,
    augmented: Vec<Vec<bool>>,
}

impl GaussianGf2 {
    /// Builds the augmented matrix. All rows must share the same width.
    pub fn new(matrix: Vec<Vec<bool>>) -> Self {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, |r| r.len());
        assert!(
            matrix.iter().all(|r| r.len() == cols),
            "ragged matrix: all rows must have {} columns",
            cols
        );

        let mut augmented = Vec::with_capacity(rows);
        for (i, row) in matrix.into_iter().enumerate() {
            let mut augmented_row = row;
            augmented_row.resize(cols + rows, false);
            augmented_row[cols + i] = true;
            augmented.push(augmented_row);
        }

        GaussianGf2 {
            rows,
            cols,
            augmented,
        }
    }

    /// Forward elimination, then harvest of every row whose matrix portion
    /// is all-zero. Each returned vector has one entry per original row;
    /// the true entries name a subset of rows summing to zero over GF(2).
    pub fn dependencies(mut self) -> Vec<Vec<bool>> {
        self.eliminate();

        let dependencies: Vec<Vec<bool>> = self
            .augmented
            .iter()
            .filter(|row| row[..self.cols].iter().all(|&bit| !bit))
            .map(|row| row[self.cols..].to_vec())
            .filter(|dep| dep.iter().any(|&bit| bit))
            .collect();

        debug!("Found {} dependencies among {} rows", dependencies.len(), self.rows);
        dependencies
    }

    fn eliminate(&mut self) {
        let width = self.cols + self.rows;
        let mut pivot_row = 0;

        for col in 0..self.cols {
            if pivot_row >= self.rows {
                break;
            }
            let Some(pivot) = (pivot_row..self.rows).find(|&r| self.augmented[r][col]) else {
                continue;
            };
            self.augmented.swap(pivot_row, pivot);

            let pivot_values = self.augmented[pivot_row].clone();
            for r in 0..self.rows {
                if r != pivot_row && self.augmented[r][col] {
                    for c in 0..width {
                        self.augmented[r][c] ^= pivot_values[c];
                    }
                }
            }
            pivot_row += 1;
        }
    }
}
