//! The static layers under every plot: filled contours, labelled contour lines, and a quiver of
//! the flow.

use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use model::contour::{isolines, line_levels, Bands};
use model::{Bounds, FlowField, Pt2D};

use crate::artist::Chart;
use crate::style::{format_value, px, turbo, BLACK};

/// Each grid cell is filled as this many sub-cells per side, shaded by the bilinear interpolation
/// of its corners.
const SUBDIVISIONS: usize = 4;

#[derive(Clone, Debug)]
pub struct FieldStyle {
    pub fill_bands: usize,
    pub fill_alpha: f64,
    pub line_levels: usize,
    pub label_color: RGBColor,
    pub label_pt: f64,
    /// Draw an arrow at every n-th grid point in both directions
    pub quiver_step: usize,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            fill_bands: 20,
            fill_alpha: 0.5,
            line_levels: 10,
            label_color: BLACK,
            label_pt: 12.0,
            quiver_step: 2,
        }
    }
}

pub(crate) fn draw_field(
    chart: &mut Chart<'_, '_>,
    field: &FlowField,
    style: &FieldStyle,
    bounds: &Bounds,
    dpi: u32,
) -> Result<()> {
    if let Some((min, max)) = field.p_range() {
        filled_contour(chart, field, &Bands::new(min, max, style.fill_bands), style)?;
        contour_lines(chart, field, &line_levels(min, max, style.line_levels), style, dpi)?;
    } else {
        warn!("The scalar field has no finite values; skipping contours");
    }
    quiver(chart, field, style.quiver_step, bounds, dpi)
}

fn filled_contour(
    chart: &mut Chart<'_, '_>,
    field: &FlowField,
    bands: &Bands,
    style: &FieldStyle,
) -> Result<()> {
    let (rows, cols) = field.shape();
    if rows < 2 || cols < 2 {
        return Ok(());
    }
    let n = SUBDIVISIONS;
    let mut polygons = Vec::with_capacity((rows - 1) * (cols - 1) * n * n);
    for i in 0..rows - 1 {
        for j in 0..cols - 1 {
            let p00 = field.p.get(i, j);
            let p01 = field.p.get(i, j + 1);
            let p10 = field.p.get(i + 1, j);
            let p11 = field.p.get(i + 1, j + 1);
            if ![p00, p01, p10, p11].iter().all(|v| v.is_finite()) {
                continue;
            }
            let (c00, c01) = (field.pos(i, j), field.pos(i, j + 1));
            let (c10, c11) = (field.pos(i + 1, j), field.pos(i + 1, j + 1));
            let pos_at = |s: f64, t: f64| c00.lerp(c01, s).lerp(c10.lerp(c11, s), t);
            let value_at = |s: f64, t: f64| {
                let bottom = p00 + s * (p01 - p00);
                let top = p10 + s * (p11 - p10);
                bottom + t * (top - bottom)
            };

            for a in 0..n {
                for b in 0..n {
                    let (s0, s1) = (a as f64 / n as f64, (a + 1) as f64 / n as f64);
                    let (t0, t1) = (b as f64 / n as f64, (b + 1) as f64 / n as f64);
                    let value = value_at((s0 + s1) / 2.0, (t0 + t1) / 2.0);
                    let color = turbo(bands.fraction(bands.band_of(value)), style.fill_alpha);
                    let corners = vec![
                        pos_at(s0, t0).to_tuple(),
                        pos_at(s1, t0).to_tuple(),
                        pos_at(s1, t1).to_tuple(),
                        pos_at(s0, t1).to_tuple(),
                    ];
                    polygons.push(Polygon::new(corners, color.filled()));
                }
            }
        }
    }
    chart.draw_series(polygons)?;
    Ok(())
}

fn contour_lines(
    chart: &mut Chart<'_, '_>,
    field: &FlowField,
    levels: &[f64],
    style: &FieldStyle,
    dpi: u32,
) -> Result<()> {
    let width = (px(1.5, dpi).round() as u32).max(1);
    let font = TextStyle::from(("sans-serif", px(style.label_pt, dpi)).into_font())
        .color(&style.label_color)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (idx, level) in levels.iter().enumerate() {
        let fraction = if levels.len() == 1 {
            0.5
        } else {
            idx as f64 / (levels.len() - 1) as f64
        };
        let color = turbo(fraction, 1.0);
        let segments = isolines(field, *level);
        if segments.is_empty() {
            continue;
        }
        chart.draw_series(segments.iter().map(|(a, b)| {
            PathElement::new(vec![a.to_tuple(), b.to_tuple()], color.stroke_width(width))
        }))?;

        // One label per level, on the middle segment
        let (a, b) = segments[segments.len() / 2];
        let mid = a.lerp(b, 0.5);
        chart.draw_series(std::iter::once(Text::new(
            format_value(*level),
            mid.to_tuple(),
            font.clone(),
        )))?;
    }
    Ok(())
}

fn quiver(
    chart: &mut Chart<'_, '_>,
    field: &FlowField,
    step: usize,
    bounds: &Bounds,
    dpi: u32,
) -> Result<()> {
    let samples = field.quiver_samples(step);
    let scale = match arrow_scale(field, step) {
        Some(scale) => scale,
        None => return Ok(()),
    };

    // Arrowheads are shaped in pixel space, so they don't shear when the axes aren't square.
    let (w, h) = chart.plotting_area().dim_in_pixel();
    let sx = w as f64 / bounds.width();
    let sy = h as f64 / bounds.height();
    let width = (px(1.0, dpi).round() as u32).max(1);
    let max_head = px(5.0, dpi);

    let mut arrows = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        if !sample.u.is_finite() || !sample.v.is_finite() {
            continue;
        }
        let tail = sample.pos;
        let tip = tail.offset(sample.u * scale, sample.v * scale);
        arrows.push(PathElement::new(
            vec![tail.to_tuple(), tip.to_tuple()],
            BLACK.stroke_width(width),
        ));

        let (dx, dy) = ((tip.x - tail.x) * sx, (tip.y - tail.y) * sy);
        let len = dx.hypot(dy);
        if len < 1.0 {
            continue;
        }
        let head = (0.35 * len).min(max_head);
        let (bx, by) = (-dx / len * head, -dy / len * head);
        let wing = |angle: f64| -> Pt2D {
            let (sin, cos) = angle.sin_cos();
            tip.offset((bx * cos - by * sin) / sx, (bx * sin + by * cos) / sy)
        };
        let spread = 25f64.to_radians();
        arrows.push(PathElement::new(
            vec![
                wing(spread).to_tuple(),
                tip.to_tuple(),
                wing(-spread).to_tuple(),
            ],
            BLACK.stroke_width(width),
        ));
    }
    chart.draw_series(arrows)?;
    Ok(())
}

/// Data units per unit of velocity, so the longest arrow spans most of the gap between
/// neighbouring arrows. None if there's nothing to draw.
pub(crate) fn arrow_scale(field: &FlowField, step: usize) -> Option<f64> {
    let max_magnitude = field
        .quiver_samples(step)
        .into_iter()
        .map(|s| s.u.hypot(s.v))
        .filter(|m| m.is_finite())
        .fold(0.0, f64::max);
    if max_magnitude == 0.0 {
        return None;
    }

    let bounds = field.bounds();
    let sub = field.x.subsample(step);
    let mut spacing = f64::MAX;
    if sub.cols() > 1 {
        spacing = spacing.min(bounds.width() / (sub.cols() - 1) as f64);
    }
    if sub.rows() > 1 {
        spacing = spacing.min(bounds.height() / (sub.rows() - 1) as f64);
    }
    if spacing == f64::MAX || spacing <= 0.0 {
        spacing = 1.0;
    }
    Some(0.9 * spacing / max_magnitude)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use model::Grid;

    fn field(u: f64) -> FlowField {
        let axis = [0.0, 1.0, 2.0, 3.0, 4.0];
        let (x, y) = Grid::meshgrid(&axis, &axis).unwrap();
        let p = Grid::from_fn(5, 5, |i, j| (i * j) as f64).unwrap();
        let u = Grid::from_fn(5, 5, |i, _| u * i as f64).unwrap();
        let v = Grid::from_fn(5, 5, |_, _| 0.0).unwrap();
        FlowField::new(x, y, p, u, v).unwrap()
    }

    #[test]
    fn longest_arrow_fills_the_subsampled_spacing() {
        // Every second point of 0..=4 leaves arrows 2 units apart; the fastest flow is 4 * 0.5.
        let scale = arrow_scale(&field(0.5), 2).unwrap();
        assert_relative_eq!(scale * 2.0, 0.9 * 2.0);
    }

    #[test]
    fn still_flow_has_no_arrows() {
        assert_eq!(arrow_scale(&field(0.0), 2), None);
    }
}
