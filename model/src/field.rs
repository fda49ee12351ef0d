use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{Bounds, Grid, Pt2D};

/// The background of every plot: coordinate grids `x`/`y`, a scalar potential `p`, and the flow
/// velocity `(u, v)`, all sampled at the same grid points.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawFlowField")]
pub struct FlowField {
    pub x: Grid,
    pub y: Grid,
    pub p: Grid,
    pub u: Grid,
    pub v: Grid,
}

/// One arrow of a quiver plot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuiverSample {
    pub pos: Pt2D,
    pub u: f64,
    pub v: f64,
}

impl FlowField {
    pub fn new(x: Grid, y: Grid, p: Grid, u: Grid, v: Grid) -> Result<Self> {
        let shape = x.shape();
        for (name, grid) in [("Y", &y), ("p", &p), ("u", &u), ("v", &v)] {
            if grid.shape() != shape {
                bail!(
                    "Field grid {name} is {:?}, but X is {:?}",
                    grid.shape(),
                    shape
                );
            }
        }
        Ok(Self { x, y, p, u, v })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    pub fn pos(&self, i: usize, j: usize) -> Pt2D {
        Pt2D::new(self.x.get(i, j), self.y.get(i, j))
    }

    pub fn bounds(&self) -> Bounds {
        let (rows, cols) = self.shape();
        let mut b = Bounds::new();
        for i in 0..rows {
            for j in 0..cols {
                b.update(self.pos(i, j));
            }
        }
        b
    }

    /// The smallest and largest value of the scalar field
    pub fn p_range(&self) -> Option<(f64, f64)> {
        self.p.range()
    }

    /// The vector field at every `step`-th grid point in both directions
    pub fn quiver_samples(&self, step: usize) -> Vec<QuiverSample> {
        let x = self.x.subsample(step);
        let y = self.y.subsample(step);
        let u = self.u.subsample(step);
        let v = self.v.subsample(step);
        let (rows, cols) = x.shape();
        let mut samples = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                samples.push(QuiverSample {
                    pos: Pt2D::new(x.get(i, j), y.get(i, j)),
                    u: u.get(i, j),
                    v: v.get(i, j),
                });
            }
        }
        samples
    }
}

#[derive(Deserialize)]
struct RawFlowField {
    #[serde(alias = "X")]
    x: Grid,
    #[serde(alias = "Y")]
    y: Grid,
    p: Grid,
    u: Grid,
    v: Grid,
}

impl TryFrom<RawFlowField> for FlowField {
    type Error = anyhow::Error;

    fn try_from(raw: RawFlowField) -> Result<Self> {
        Self::new(raw.x, raw.y, raw.p, raw.u, raw.v)
    }
}
