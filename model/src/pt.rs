use serde::{Deserialize, Serialize};

/// A position in the plane of the flow field. Serialized as a bare `[x, y]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Pt2D {
    pub x: f64,
    pub y: f64,
}

/// One particle cloud
pub type PointSet = Vec<Pt2D>;

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Linear interpolation; `pct` of 0 is self, 1 is `other`.
    pub fn lerp(self, other: Pt2D, pct: f64) -> Self {
        Self::new(
            self.x + pct * (other.x - self.x),
            self.y + pct * (other.y - self.y),
        )
    }

    pub fn to_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<[f64; 2]> for Pt2D {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Pt2D> for [f64; 2] {
    fn from(pt: Pt2D) -> Self {
        [pt.x, pt.y]
    }
}
