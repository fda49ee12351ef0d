//! Contour geometry of a scalar field sampled on a grid: evenly spaced levels, filled bands, and
//! isolines traced with marching squares.

use crate::{FlowField, Pt2D};

/// `n` levels evenly spaced strictly between `min` and `max`, for contour lines. A flat field has
/// no lines.
pub fn line_levels(min: f64, max: f64, n: usize) -> Vec<f64> {
    if !(max > min) || n == 0 {
        return Vec::new();
    }
    let step = (max - min) / (n + 1) as f64;
    (1..=n).map(|k| min + step * k as f64).collect()
}

/// Evenly spaced intervals covering the whole range of a field, for filled contours
#[derive(Clone, Debug, PartialEq)]
pub struct Bands {
    boundaries: Vec<f64>,
}

impl Bands {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let n = n.max(1);
        if !(max > min) {
            return Self {
                boundaries: vec![min, min],
            };
        }
        let step = (max - min) / n as f64;
        let mut boundaries: Vec<f64> = (0..n).map(|k| min + step * k as f64).collect();
        boundaries.push(max);
        Self { boundaries }
    }

    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// The band containing `value`. Values outside the range land in the first or last band.
    pub fn band_of(&self, value: f64) -> usize {
        let last = self.len() - 1;
        // The first boundary greater than the value closes its band
        let idx = self.boundaries[1..].partition_point(|b| *b <= value);
        idx.min(last)
    }

    /// The band's position in `[0, 1]`, for looking up a colormap
    pub fn fraction(&self, band: usize) -> f64 {
        if self.len() == 1 {
            return 0.5;
        }
        band as f64 / (self.len() - 1) as f64
    }
}

/// One straight piece of an isoline
pub type Segment = (Pt2D, Pt2D);

/// All segments where the scalar field `p` crosses `level`
pub fn isolines(field: &FlowField, level: f64) -> Vec<Segment> {
    let (rows, cols) = field.shape();
    let mut segments = Vec::new();
    if rows < 2 || cols < 2 {
        return segments;
    }

    for i in 0..rows - 1 {
        for j in 0..cols - 1 {
            // Corners go around the cell; edge k joins corner k to corner k + 1.
            let corners = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];
            let values = corners.map(|(ci, cj)| field.p.get(ci, cj));
            if values.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let pos = corners.map(|(ci, cj)| field.pos(ci, cj));
            let above = values.map(|v| v >= level);

            let crossing = |edge: usize| -> Option<Pt2D> {
                let a = edge;
                let b = (edge + 1) % 4;
                if above[a] == above[b] {
                    return None;
                }
                let pct = (level - values[a]) / (values[b] - values[a]);
                Some(pos[a].lerp(pos[b], pct))
            };
            let crossings: Vec<(usize, Pt2D)> =
                (0..4).filter_map(|e| crossing(e).map(|pt| (e, pt))).collect();

            match crossings.len() {
                2 => segments.push((crossings[0].1, crossings[1].1)),
                4 => {
                    // A saddle: opposite corners agree. The centre decides which pair of corners
                    // is connected through the middle of the cell.
                    let centre = values.iter().sum::<f64>() / 4.0;
                    let pt = |edge: usize| crossings[edge].1;
                    if (centre >= level) == above[0] {
                        // Corners 1 and 3 are cut off
                        segments.push((pt(0), pt(1)));
                        segments.push((pt(2), pt(3)));
                    } else {
                        // Corners 0 and 2 are cut off
                        segments.push((pt(3), pt(0)));
                        segments.push((pt(1), pt(2)));
                    }
                }
                _ => {}
            }
        }
    }
    segments
}
