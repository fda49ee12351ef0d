use crate::{Intervals, Pt2D, Trajectories};

/// Computes what every drawable shows on one frame of an animation. Holds only borrowed,
/// immutable input; nothing here touches a rendering backend.
pub struct FrameState<'a> {
    series: &'a Trajectories,
    intervals: Intervals,
}

/// The data each drawable receives on one frame. `None` means the series didn't update on this
/// frame, and whatever it showed before stays.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameUpdate<'a> {
    pub frame: usize,
    /// Path travelled before this frame, exclusive of the current point
    pub true_path: &'a [Pt2D],
    /// Where the vehicle is now
    pub vehicle: Pt2D,
    pub predictions: &'a [Pt2D],
    pub observations: Option<&'a [Pt2D]>,
    pub estimate: Option<EstimateUpdate<'a>>,
    pub resamples: Option<&'a [Pt2D]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EstimateUpdate<'a> {
    pub line: &'a [Pt2D],
    pub current: Pt2D,
}

impl<'a> FrameState<'a> {
    pub fn new(series: &'a Trajectories, intervals: Intervals) -> Self {
        Self { series, intervals }
    }

    pub fn num_frames(&self) -> usize {
        self.intervals.frames
    }

    pub fn apply(&self, i: usize) -> FrameUpdate<'a> {
        let series = self.series;
        let ivl = &self.intervals;

        let observations = if ivl.observations.fires(i) {
            Some(&series.observations[..ivl.observations.revealed(i)])
        } else {
            None
        };

        let estimate = if ivl.estimates.fires(i) {
            Some(EstimateUpdate {
                line: &series.estimates[..ivl.estimates.revealed(i)],
                current: series.estimates[ivl.estimates.current(i)],
            })
        } else {
            None
        };

        let resamples = if ivl.resamples.fires(i) {
            Some(series.resamples[ivl.resamples.current(i)].as_slice())
        } else {
            None
        };

        FrameUpdate {
            frame: i,
            true_path: &series.true_path[..i],
            vehicle: series.true_path[i],
            predictions: &series.predictions[i],
            observations,
            estimate,
            resamples,
        }
    }

    /// Every frame, in order
    pub fn frames(&self) -> impl Iterator<Item = FrameUpdate<'a>> + '_ {
        (0..self.num_frames()).map(move |i| self.apply(i))
    }
}

/// The persistent state of every drawable, as plain data. Starts out empty, like freshly created
/// plot artists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Visible<'a> {
    pub true_path: &'a [Pt2D],
    pub vehicle: Option<Pt2D>,
    pub predictions: &'a [Pt2D],
    pub observations: &'a [Pt2D],
    pub estimate_line: &'a [Pt2D],
    pub estimate: Option<Pt2D>,
    pub resamples: &'a [Pt2D],
}

impl<'a> Visible<'a> {
    pub fn apply(&mut self, update: &FrameUpdate<'a>) {
        self.true_path = update.true_path;
        self.vehicle = Some(update.vehicle);
        self.predictions = update.predictions;
        if let Some(observations) = update.observations {
            self.observations = observations;
        }
        if let Some(ref estimate) = update.estimate {
            self.estimate_line = estimate.line;
            self.estimate = Some(estimate.current);
        }
        if let Some(resamples) = update.resamples {
            self.resamples = resamples;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlignmentPolicy;

    fn line(n: usize, y: f64) -> Vec<Pt2D> {
        (0..n).map(|i| Pt2D::new(i as f64, y)).collect()
    }

    fn series() -> Trajectories {
        Trajectories {
            true_path: line(10, 0.0),
            observations: line(5, 1.0),
            estimates: line(2, 2.0),
            predictions: (0..10).map(|i| line(i + 1, 3.0)).collect(),
            resamples: vec![line(4, 4.0)],
        }
    }

    #[test]
    fn first_frame() {
        let series = series();
        let intervals = Intervals::new(&series, AlignmentPolicy::Strict).unwrap();
        let state = FrameState::new(&series, intervals);
        let update = state.apply(0);
        assert!(update.true_path.is_empty());
        assert_eq!(update.vehicle, Pt2D::new(0.0, 0.0));
        assert_eq!(update.predictions.len(), 1);
        // Every gate fires on frame 0, revealing nothing yet but the first markers
        assert_eq!(update.observations, Some(&[][..]));
        let estimate = update.estimate.unwrap();
        assert!(estimate.line.is_empty());
        assert_eq!(estimate.current, Pt2D::new(0.0, 2.0));
        assert_eq!(update.resamples.unwrap().len(), 4);
    }

    #[test]
    fn gates_skip_frames_between_intervals() {
        let series = series();
        let intervals = Intervals::new(&series, AlignmentPolicy::Strict).unwrap();
        let state = FrameState::new(&series, intervals);
        let update = state.apply(3);
        assert_eq!(update.true_path.len(), 3);
        assert_eq!(update.observations, None);
        assert_eq!(update.estimate, None);
        assert_eq!(update.resamples, None);

        let update = state.apply(6);
        assert_eq!(update.observations.unwrap().len(), 3);
        assert_eq!(update.estimate, None);
    }

    #[test]
    fn last_frame_shows_everything_but_the_final_samples() {
        let series = series();
        let intervals = Intervals::new(&series, AlignmentPolicy::Strict).unwrap();
        let state = FrameState::new(&series, intervals);
        let mut visible = Visible::default();
        for update in state.frames() {
            visible.apply(&update);
        }
        assert_eq!(visible.true_path.len(), 9);
        assert_eq!(visible.vehicle, Some(Pt2D::new(9.0, 0.0)));
        assert_eq!(visible.observations.len(), 4);
        assert_eq!(visible.estimate_line.len(), 1);
        assert_eq!(visible.estimate, Some(Pt2D::new(1.0, 2.0)));
        assert_eq!(visible.predictions.len(), 10);
    }
}
