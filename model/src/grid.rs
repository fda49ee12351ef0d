use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};

/// A dense, rectangular 2D array, stored row-major. Row `i` runs along y, column `j` along x, the
/// same orientation `meshgrid` produces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            bail!("Grid must have at least one row and column, got {rows}x{cols}");
        }
        if values.len() != rows * cols {
            bail!(
                "Grid is {rows}x{cols}, but has {} values",
                values.len()
            );
        }
        Ok(Self { rows, cols, values })
    }

    pub fn from_fn<F: Fn(usize, usize) -> f64>(rows: usize, cols: usize, f: F) -> Result<Self> {
        let mut values = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                values.push(f(i, j));
            }
        }
        Self::new(rows, cols, values)
    }

    /// Coordinate grids from 1D axes: `X[i][j] = xs[j]`, `Y[i][j] = ys[i]`.
    pub fn meshgrid(xs: &[f64], ys: &[f64]) -> Result<(Grid, Grid)> {
        let x = Self::from_fn(ys.len(), xs.len(), |_, j| xs[j])?;
        let y = Self::from_fn(ys.len(), xs.len(), |i, _| ys[i])?;
        Ok((x, y))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.cols + j]
    }

    /// Every `step`-th row and column, starting from the first. `step` of 2 is `[::2, ::2]`.
    pub fn subsample(&self, step: usize) -> Grid {
        let step = step.max(1);
        let rows = (self.rows + step - 1) / step;
        let cols = (self.cols + step - 1) / step;
        let mut values = Vec::with_capacity(rows * cols);
        for i in (0..self.rows).step_by(step) {
            for j in (0..self.cols).step_by(step) {
                values.push(self.get(i, j));
            }
        }
        Grid { rows, cols, values }
    }

    /// Smallest and largest finite value, or None if there are none.
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut result: Option<(f64, f64)> = None;
        for v in self.values.iter().copied().filter(|v| v.is_finite()) {
            result = Some(match result {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        result
    }
}

impl TryFrom<Vec<Vec<f64>>> for Grid {
    type Error = Error;

    fn try_from(nested: Vec<Vec<f64>>) -> Result<Self> {
        let rows = nested.len();
        let cols = nested.first().map(|row| row.len()).unwrap_or(0);
        let mut values = Vec::with_capacity(rows * cols);
        for (idx, row) in nested.into_iter().enumerate() {
            if row.len() != cols {
                bail!(
                    "Ragged grid: row 0 has {cols} values, but row {idx} has {}",
                    row.len()
                );
            }
            values.extend(row);
        }
        Self::new(rows, cols, values)
    }
}

impl From<Grid> for Vec<Vec<f64>> {
    fn from(grid: Grid) -> Self {
        grid.values
            .chunks(grid.cols)
            .map(|row| row.to_vec())
            .collect()
    }
}
