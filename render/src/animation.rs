use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use model::{AlignmentPolicy, FlowField, FrameState, FrameUpdate, Intervals, Trajectories};

use crate::figure::{ArtistID, Figure, FigureOptions};
use crate::layers::FieldStyle;
use crate::style::*;
use crate::video::{self, FrameSink};
use crate::Artist;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimationOptions {
    pub figure: FigureOptions,
    /// Milliseconds between frames on playback. Doesn't change which frames are produced.
    pub interval_ms: u32,
    pub path: PathBuf,
    pub alignment: AlignmentPolicy,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            figure: FigureOptions::default(),
            interval_ms: 35,
            path: PathBuf::from("particle_ani.mp4"),
            alignment: AlignmentPolicy::default(),
        }
    }
}

/// Renders one frame per point of the true path into a video file.
pub fn make_animation(
    series: &Trajectories,
    field: &FlowField,
    options: &AnimationOptions,
) -> Result<()> {
    // Check everything cheap before any drawing or output happens
    let intervals = Intervals::new(series, options.alignment)?;
    if options.interval_ms == 0 {
        bail!("Frames must be at least 1ms apart");
    }
    let mut animation = Animation::new(series, field, &options.figure)?;

    info!(
        "Rendering {} frames to {}",
        intervals.frames,
        options.path.display()
    );
    let mut sink = video::open(&options.path, animation.figure.size(), options.interval_ms)?;
    // On error, the sink and figure are dropped here, which abandons the output
    animation.run(&FrameState::new(series, intervals), sink.as_mut())?;
    sink.finish()
}

/// Like `make_animation`, but hands frames to any sink.
pub fn make_animation_into(
    series: &Trajectories,
    field: &FlowField,
    options: &FigureOptions,
    alignment: AlignmentPolicy,
    sink: &mut dyn FrameSink,
) -> Result<()> {
    let intervals = Intervals::new(series, alignment)?;
    let mut animation = Animation::new(series, field, options)?;
    animation.run(&FrameState::new(series, intervals), sink)
}

/// A figure with its field drawn once, and the artists mutated on every frame
struct Animation {
    figure: Figure,
    handles: Handles,
}

struct Handles {
    vehicle: ArtistID,
    true_path: ArtistID,
    observations: ArtistID,
    estimate_line: ArtistID,
    estimate: ArtistID,
    predictions: ArtistID,
    resamples: ArtistID,
}

impl Animation {
    fn new(series: &Trajectories, field: &FlowField, options: &FigureOptions) -> Result<Self> {
        // Artists start empty and don't influence the limits; the field decides them.
        let mut bounds = field.bounds();
        if bounds.is_empty() {
            bounds = series.bounds();
        }
        let mut figure = Figure::new(options.clone(), bounds)?;
        figure.draw_field(
            field,
            &FieldStyle {
                label_color: GRAY,
                ..Default::default()
            },
        )?;

        let handles = Handles {
            vehicle: figure.add_artist(Artist::scatter(BLUE).zorder(Z_TRUE_PATH)),
            true_path: figure.add_artist(
                Artist::line(BLUE)
                    .label("Submarine Path")
                    .zorder(Z_TRUE_PATH),
            ),
            observations: figure.add_artist(
                Artist::scatter(GREEN)
                    .label("Noisy Submarine Position")
                    .zorder(Z_OBSERVATIONS),
            ),
            estimate_line: figure.add_artist(
                Artist::line(ORANGE)
                    .label("Particle Filter Estimate")
                    .zorder(Z_ESTIMATE),
            ),
            estimate: figure.add_artist(Artist::scatter(RED).zorder(Z_ESTIMATE)),
            predictions: figure.add_artist(
                Artist::scatter(GRAY)
                    .size(2.0)
                    .label("Particle Prediction")
                    .zorder(Z_PREDICTIONS),
            ),
            resamples: figure.add_artist(
                Artist::scatter(PURPLE)
                    .size(2.0)
                    .label("Particle Resampling")
                    .zorder(Z_RESAMPLES),
            ),
        };
        Ok(Self { figure, handles })
    }

    fn apply(&mut self, update: &FrameUpdate) {
        let h = &self.handles;
        let figure = &mut self.figure;
        figure.artist_mut(h.true_path).set_data(update.true_path);
        figure.artist_mut(h.vehicle).set_point(update.vehicle);
        figure.artist_mut(h.predictions).set_data(update.predictions);
        if let Some(observations) = update.observations {
            figure.artist_mut(h.observations).set_data(observations);
        }
        if let Some(ref estimate) = update.estimate {
            figure.artist_mut(h.estimate_line).set_data(estimate.line);
            figure.artist_mut(h.estimate).set_point(estimate.current);
        }
        if let Some(resamples) = update.resamples {
            figure.artist_mut(h.resamples).set_data(resamples);
        }
    }

    fn run(&mut self, state: &FrameState, sink: &mut dyn FrameSink) -> Result<()> {
        let total = state.num_frames();
        let mut next_report = 0;
        for update in state.frames() {
            self.apply(&update);
            let pixels = self.figure.render()?;
            sink.write_frame(&pixels)?;

            let pct = 100 * (update.frame + 1) / total;
            if pct >= next_report {
                debug!("Frame {}/{total} ({pct}%)", update.frame + 1);
                next_report = pct + 10;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{Grid, InputError, Pt2D, Series};

    fn field() -> FlowField {
        let (x, y) = Grid::meshgrid(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        let zero = Grid::new(2, 2, vec![0.0; 4]).unwrap();
        FlowField::new(x, y, zero.clone(), zero.clone(), zero).unwrap()
    }

    fn series(observations: usize) -> Trajectories {
        let pts = |n: usize| (0..n).map(|i| Pt2D::new(i as f64, 0.0)).collect::<Vec<_>>();
        Trajectories {
            true_path: pts(4),
            observations: pts(observations),
            estimates: pts(2),
            predictions: vec![pts(1); 4],
            resamples: vec![pts(1); 2],
        }
    }

    fn tiny_figure() -> FigureOptions {
        FigureOptions {
            figsize: (2.0, 1.5),
            dpi: 60,
            ..Default::default()
        }
    }

    #[test]
    fn updates_reach_their_own_artists() {
        let line = |n: usize, y: f64| (0..n).map(|i| Pt2D::new(i as f64, y)).collect::<Vec<_>>();
        // Sets are sized distinctly, so a swapped handle shows up as the wrong length
        let series = Trajectories {
            true_path: line(100, 0.0),
            observations: line(10, 1.0),
            estimates: line(20, 2.0),
            predictions: (0..100).map(|i| line(i % 3 + 1, 3.0)).collect(),
            resamples: (0..5).map(|k| line(10 + k, 4.0)).collect(),
        };
        let intervals = Intervals::new(&series, AlignmentPolicy::Strict).unwrap();
        let state = FrameState::new(&series, intervals);
        let mut animation = Animation::new(&series, &field(), &tiny_figure()).unwrap();
        for i in 0..=40 {
            animation.apply(&state.apply(i));
        }

        let h = &animation.handles;
        let figure = &animation.figure;
        assert_eq!(figure.artist(h.true_path).data(), &series.true_path[..40]);
        assert_eq!(figure.artist(h.vehicle).data(), &[series.true_path[40]]);
        assert_eq!(figure.artist(h.predictions).data(), &series.predictions[40][..]);
        assert_eq!(figure.artist(h.observations).data().len(), 4);
        assert_eq!(figure.artist(h.estimate_line).data().len(), 8);
        assert_eq!(figure.artist(h.estimate).data(), &[series.estimates[8]]);
        assert_eq!(figure.artist(h.resamples).data(), &series.resamples[2][..]);
    }

    #[test]
    fn invalid_input_fails_before_any_output() {
        let path = std::env::temp_dir().join(format!(
            "flowplot_never_written_{}.gif",
            std::process::id()
        ));
        let options = AnimationOptions {
            path: path.clone(),
            ..Default::default()
        };
        let err = make_animation(&series(0), &field(), &options).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::Empty(Series::Observations))
        );
        assert!(!path.exists());
    }

    #[test]
    fn zero_interval_fails_before_any_output() {
        let path = std::env::temp_dir().join(format!(
            "flowplot_zero_interval_{}.gif",
            std::process::id()
        ));
        let options = AnimationOptions {
            path: path.clone(),
            interval_ms: 0,
            ..Default::default()
        };
        assert!(make_animation(&series(2), &field(), &options).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn defaults() {
        let options = AnimationOptions::default();
        assert_eq!(options.interval_ms, 35);
        assert_eq!(options.path, PathBuf::from("particle_ani.mp4"));
        assert_eq!(options.alignment, AlignmentPolicy::Truncate);
    }
}
