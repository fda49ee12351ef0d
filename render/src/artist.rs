use anyhow::Result;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use model::Pt2D;

use crate::style::{marker_radius, px};

pub(crate) type Chart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// How an artist's points are drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mark {
    /// Connected through every point, `width` in points
    Line { width: f64 },
    /// One filled circle per point; `size` is the marker area in points squared
    Scatter { size: f64 },
}

/// A drawable whose data can be replaced between frames
#[derive(Clone, Debug)]
pub struct Artist {
    pub mark: Mark,
    pub color: RGBColor,
    pub zorder: u8,
    pub label: Option<String>,
    data: Vec<Pt2D>,
}

impl Artist {
    pub fn line(color: RGBColor) -> Self {
        Self::new(Mark::Line { width: 1.5 }, color)
    }

    pub fn scatter(color: RGBColor) -> Self {
        Self::new(Mark::Scatter { size: 36.0 }, color)
    }

    fn new(mark: Mark, color: RGBColor) -> Self {
        Self {
            mark,
            color,
            zorder: 0,
            label: None,
            data: Vec::new(),
        }
    }

    /// Only meaningful for scatter artists
    pub fn size(mut self, size: f64) -> Self {
        if let Mark::Scatter { .. } = self.mark {
            self.mark = Mark::Scatter { size };
        }
        self
    }

    pub fn zorder(mut self, zorder: u8) -> Self {
        self.zorder = zorder;
        self
    }

    pub fn label<I: Into<String>>(mut self, label: I) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_data(mut self, pts: &[Pt2D]) -> Self {
        self.set_data(pts);
        self
    }

    /// Replaces everything previously shown
    pub fn set_data(&mut self, pts: &[Pt2D]) {
        self.data.clear();
        self.data.extend_from_slice(pts);
    }

    pub fn set_point(&mut self, pt: Pt2D) {
        self.set_data(&[pt]);
    }

    pub fn data(&self) -> &[Pt2D] {
        &self.data
    }

    pub(crate) fn draw(&self, chart: &mut Chart<'_, '_>, dpi: u32) -> Result<()> {
        let color = self.color;
        let pts = self.data.iter().map(|pt| pt.to_tuple());
        // The legend sample is about as long as a short word
        let sample = px(14.0, dpi) as i32;

        match self.mark {
            Mark::Line { width } => {
                let width = (px(width, dpi).round() as u32).max(1);
                let anno = chart.draw_series(LineSeries::new(pts, color.stroke_width(width)))?;
                if let Some(ref label) = self.label {
                    anno.label(label.clone()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + sample, y)], color.stroke_width(width))
                    });
                }
            }
            Mark::Scatter { size } => {
                let radius = marker_radius(size, dpi);
                let anno = chart.draw_series(pts.map(|pt| Circle::new(pt, radius, color.filled())))?;
                if let Some(ref label) = self.label {
                    // Tiny particles would vanish from the legend
                    let radius = radius.max(marker_radius(20.0, dpi));
                    anno.label(label.clone()).legend(move |(x, y)| {
                        Circle::new((x + sample / 2, y), radius, color.filled())
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{GRAY, PURPLE};

    #[test]
    fn set_data_replaces_wholesale() {
        let mut cloud = Artist::scatter(PURPLE).size(2.0);
        cloud.set_data(&[Pt2D::new(0.0, 0.0), Pt2D::new(1.0, 1.0), Pt2D::new(2.0, 2.0)]);
        cloud.set_data(&[Pt2D::new(5.0, 5.0)]);
        assert_eq!(cloud.data(), &[Pt2D::new(5.0, 5.0)]);
        assert_eq!(cloud.mark, Mark::Scatter { size: 2.0 });
    }

    #[test]
    fn size_only_applies_to_markers() {
        let line = Artist::line(GRAY).size(2.0).zorder(3).label("path");
        assert_eq!(line.mark, Mark::Line { width: 1.5 });
        assert_eq!(line.zorder, 3);
        assert_eq!(line.label.as_deref(), Some("path"));
    }
}
