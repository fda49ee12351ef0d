use plotters::style::RGBColor;

pub const BLUE: RGBColor = RGBColor(0, 0, 255);
pub const GREEN: RGBColor = RGBColor(0, 128, 0);
pub const ORANGE: RGBColor = RGBColor(255, 165, 0);
pub const RED: RGBColor = RGBColor(255, 0, 0);
pub const GRAY: RGBColor = RGBColor(128, 128, 128);
pub const PURPLE: RGBColor = RGBColor(128, 0, 128);
pub const BLACK: RGBColor = RGBColor(0, 0, 0);
pub const WHITE: RGBColor = RGBColor(255, 255, 255);

// Stacking order of the animated artists. The field layers are always underneath.
pub const Z_PREDICTIONS: u8 = 5;
pub const Z_OBSERVATIONS: u8 = 6;
pub const Z_ESTIMATE: u8 = 7;
pub const Z_RESAMPLES: u8 = 7;
pub const Z_TRUE_PATH: u8 = 8;

/// Typographic points to pixels
pub fn px(pt: f64, dpi: u32) -> f64 {
    pt * dpi as f64 / 72.0
}

/// Scatter sizes are marker areas in points squared; plotters wants a radius in pixels.
pub fn marker_radius(area_pt2: f64, dpi: u32) -> u32 {
    (px(area_pt2.sqrt() / 2.0, dpi).round() as u32).max(1)
}

/// A colormap sample at `fraction` in [0, 1], optionally washed out towards white
pub fn turbo(fraction: f64, alpha: f64) -> RGBColor {
    let c = colorous::TURBO.eval_continuous(fraction.clamp(0.0, 1.0));
    let blend = |channel: u8| -> u8 {
        (alpha * channel as f64 + (1.0 - alpha) * 255.0).round() as u8
    };
    RGBColor(blend(c.r), blend(c.g), blend(c.b))
}

/// Compact decimal formatting for tick and contour labels: "2.5", not "2.50"
pub fn format_value(value: f64) -> String {
    if value.abs() >= 1000.0 {
        return format!("{:.0}", value);
    }
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_conversions() {
        assert_eq!(px(72.0, 250), 250.0);
        // The default marker (36 pt^2) is 3 points across the radius
        assert_eq!(marker_radius(36.0, 72), 3);
        assert_eq!(marker_radius(2.0, 72), 1);
    }

    #[test]
    fn turbo_washes_towards_white() {
        assert_eq!(turbo(0.3, 0.0), WHITE);
        let full = turbo(0.0, 1.0);
        let half = turbo(0.0, 0.5);
        assert!(half.0 >= full.0 && half.1 >= full.1 && half.2 >= full.2);
    }

    #[test]
    fn labels_drop_trailing_zeros() {
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(-0.001), "0");
        assert_eq!(format_value(0.126), "0.13");
        assert_eq!(format_value(12345.6), "12346");
    }
}
