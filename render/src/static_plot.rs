use std::path::PathBuf;

use anyhow::Result;

use model::{FlowField, Trajectories};

use crate::figure::{Figure, FigureOptions};
use crate::layers::FieldStyle;
use crate::style::{BLUE, ORANGE, RED};
use crate::Artist;

/// Shows a finished figure somewhere
pub trait Display {
    /// May block, for instance until a window is closed
    fn show(&mut self, figure: &Figure, pixels: &[u8]) -> Result<()>;
}

/// Displays a figure by saving it as a PNG
pub struct SavePng {
    pub path: PathBuf,
}

impl Display for SavePng {
    fn show(&mut self, figure: &Figure, pixels: &[u8]) -> Result<()> {
        let (w, h) = figure.size();
        image::save_buffer(&self.path, pixels, w, h, image::ColorType::Rgb8)?;
        info!("Saved figure to {}", self.path.display());
        Ok(())
    }
}

/// The whole trajectory at once: true path, noisy observations, and the filter estimate over the
/// flow field.
pub fn render_static(
    series: &Trajectories,
    field: &FlowField,
    options: &FigureOptions,
) -> Result<Figure> {
    let mut bounds = field.bounds();
    bounds.union(&series.bounds());

    let mut figure = Figure::new(options.clone(), bounds)?;
    figure.draw_field(field, &FieldStyle::default())?;

    figure.add_artist(
        Artist::line(BLUE)
            .label("Submarine path")
            .with_data(&series.true_path),
    );
    figure.add_artist(
        Artist::scatter(RED)
            .size(10.0)
            .label("Noisy Submarine Position")
            .with_data(&series.observations),
    );
    figure.add_artist(
        Artist::line(ORANGE)
            .label("Particle Filter estimate")
            .with_data(&series.estimates),
    );
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::ArtistID;
    use crate::Mark;
    use model::{Grid, Pt2D};

    fn field() -> FlowField {
        let (x, y) = Grid::meshgrid(&[0.0, 5.0, 10.0], &[0.0, 5.0, 10.0]).unwrap();
        let p = Grid::from_fn(3, 3, |i, j| (i + j) as f64).unwrap();
        let u = Grid::new(3, 3, vec![1.0; 9]).unwrap();
        let v = Grid::new(3, 3, vec![0.5; 9]).unwrap();
        FlowField::new(x, y, p, u, v).unwrap()
    }

    fn series() -> Trajectories {
        let pts = |n: usize, y: f64| (0..n).map(|i| Pt2D::new(i as f64, y)).collect::<Vec<_>>();
        let mut true_path = pts(6, 2.0);
        // Wanders off the field
        true_path.push(Pt2D::new(14.0, -3.0));
        Trajectories {
            true_path,
            observations: pts(3, 3.0),
            estimates: pts(4, 2.5),
            predictions: Vec::new(),
            resamples: Vec::new(),
        }
    }

    #[test]
    fn path_observations_and_estimate() {
        let series = series();
        let options = FigureOptions {
            figsize: (2.0, 1.5),
            dpi: 60,
            ..Default::default()
        };
        let figure = render_static(&series, &field(), &options).unwrap();

        let path = figure.artist(ArtistID(0));
        assert_eq!(path.mark, Mark::Line { width: 1.5 });
        assert_eq!(path.color, BLUE);
        assert_eq!(path.label.as_deref(), Some("Submarine path"));
        assert_eq!(path.data(), &series.true_path[..]);

        let observations = figure.artist(ArtistID(1));
        assert_eq!(observations.mark, Mark::Scatter { size: 10.0 });
        assert_eq!(observations.color, RED);
        assert_eq!(
            observations.label.as_deref(),
            Some("Noisy Submarine Position")
        );
        assert_eq!(observations.data(), &series.observations[..]);

        let estimate = figure.artist(ArtistID(2));
        assert_eq!(estimate.mark, Mark::Line { width: 1.5 });
        assert_eq!(estimate.color, ORANGE);
        assert_eq!(estimate.label.as_deref(), Some("Particle Filter estimate"));
        assert_eq!(estimate.data(), &series.estimates[..]);

        // Axes cover both the field and the stray path point
        assert!(figure.bounds().contains(Pt2D::new(14.0, -3.0)));
        assert!(figure.bounds().contains(Pt2D::new(0.0, 10.0)));

        let pixels = figure.render().unwrap();
        assert_eq!(figure.size(), (120, 90));
        assert_eq!(pixels.len(), 120 * 90 * 3);
    }
}
