use serde::{Deserialize, Serialize};

use crate::Pt2D;

/// An axis-aligned extent, grown one point at a time
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// An empty extent; any update replaces it.
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            min_y: f64::MAX,
            max_x: f64::MIN,
            max_y: f64::MIN,
        }
    }

    pub fn from(pts: &[Pt2D]) -> Self {
        let mut b = Self::new();
        for pt in pts {
            b.update(*pt);
        }
        b
    }

    pub fn update(&mut self, pt: Pt2D) {
        // NaN would poison every later comparison
        if !pt.x.is_finite() || !pt.y.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(pt.x);
        self.min_y = self.min_y.min(pt.y);
        self.max_x = self.max_x.max(pt.x);
        self.max_y = self.max_y.max(pt.y);
    }

    pub fn union(&mut self, other: &Bounds) {
        if other.is_empty() {
            return;
        }
        self.update(Pt2D::new(other.min_x, other.min_y));
        self.update(Pt2D::new(other.max_x, other.max_y));
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, pt: Pt2D) -> bool {
        pt.x >= self.min_x && pt.x <= self.max_x && pt.y >= self.min_y && pt.y <= self.max_y
    }

    /// Axes need a non-zero span in both directions. An empty extent becomes the unit square, and
    /// a flat dimension is widened by half a unit on each side.
    pub fn plottable(&self) -> Bounds {
        if self.is_empty() {
            return Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 1.0,
                max_y: 1.0,
            };
        }
        let mut b = *self;
        if b.width() == 0.0 {
            b.min_x -= 0.5;
            b.max_x += 0.5;
        }
        if b.height() == 0.0 {
            b.min_y -= 0.5;
            b.max_y += 0.5;
        }
        b
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}
