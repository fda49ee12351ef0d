//! Frame-by-frame behaviour of an animation, checked on the data each drawable would receive.

use model::{
    AlignmentPolicy, FrameState, InputError, Intervals, PointList, Pt2D, Scene, Series,
    Trajectories, Visible,
};

fn points_on_a_line(n: usize) -> Vec<Pt2D> {
    (0..n).map(|i| Pt2D::new(i as f64, 2.0 * i as f64)).collect()
}

/// Cloud `k` has `k + 1` particles, so sizes identify which set is shown
fn clouds(n: usize, offset: f64) -> Vec<Vec<Pt2D>> {
    (0..n)
        .map(|k| (0..=k).map(|p| Pt2D::new(offset + k as f64, p as f64)).collect())
        .collect()
}

fn hundred_frames() -> Trajectories {
    Trajectories {
        true_path: points_on_a_line(100),
        observations: points_on_a_line(10),
        estimates: points_on_a_line(20),
        predictions: clouds(100, 0.0),
        resamples: clouds(5, 1000.0),
    }
}

#[test]
fn frame_forty() {
    let series = hundred_frames();
    let intervals = Intervals::new(&series, AlignmentPolicy::Strict).unwrap();
    assert_eq!(intervals.observations.interval(), 10);
    assert_eq!(intervals.estimates.interval(), 5);
    assert_eq!(intervals.resamples.interval(), 20);

    let state = FrameState::new(&series, intervals);
    let mut visible = Visible::default();
    for i in 0..=40 {
        visible.apply(&state.apply(i));
    }

    assert_eq!(visible.true_path, &series.true_path[..40]);
    assert_eq!(visible.vehicle, Some(series.true_path[40]));
    assert_eq!(visible.observations.len(), 4);
    assert_eq!(visible.estimate_line.len(), 8);
    assert_eq!(visible.estimate, Some(series.estimates[8]));
    assert_eq!(visible.resamples, series.resamples[2].as_slice());
    assert_eq!(visible.predictions, series.predictions[40].as_slice());
}

#[test]
fn revealed_prefixes_never_shrink() {
    let series = hundred_frames();
    let intervals = Intervals::new(&series, AlignmentPolicy::Strict).unwrap();
    let state = FrameState::new(&series, intervals);

    let mut visible = Visible::default();
    let mut last = (0, 0, 0);
    for update in state.frames() {
        visible.apply(&update);
        let now = (
            visible.true_path.len(),
            visible.observations.len(),
            visible.estimate_line.len(),
        );
        assert!(now.0 >= last.0 && now.1 >= last.1 && now.2 >= last.2);
        // Revealed points are always a prefix of their series
        assert_eq!(visible.observations, &series.observations[..now.1]);
        assert_eq!(visible.estimate_line, &series.estimates[..now.2]);
        last = now;
    }
    assert_eq!(last, (99, 9, 19));
}

#[test]
fn clouds_are_replaced_not_accumulated() {
    let series = hundred_frames();
    let intervals = Intervals::new(&series, AlignmentPolicy::Strict).unwrap();
    let state = FrameState::new(&series, intervals);

    let mut visible = Visible::default();
    for update in state.frames() {
        let i = update.frame;
        visible.apply(&update);
        assert_eq!(visible.predictions.len(), i + 1);
        assert_eq!(visible.resamples.len(), i / 20 + 1);
    }
}

#[test]
fn uneven_series_hold_their_final_sample() {
    let mut series = hundred_frames();
    // 100 / 7 floors to 14, so the gate fires 8 times for 7 estimates
    series.estimates = points_on_a_line(7);
    assert!(Intervals::new(&series, AlignmentPolicy::Strict).is_err());

    let intervals = Intervals::new(&series, AlignmentPolicy::Truncate).unwrap();
    let state = FrameState::new(&series, intervals);
    let mut visible = Visible::default();
    for update in state.frames() {
        visible.apply(&update);
    }
    assert_eq!(visible.estimate_line.len(), 7);
    assert_eq!(visible.estimate, Some(series.estimates[6]));
}

#[test]
fn zero_observations_fail_before_any_frame() {
    let mut series = hundred_frames();
    series.observations.clear();
    let err = Intervals::new(&series, AlignmentPolicy::Truncate).unwrap_err();
    assert_eq!(
        err.downcast_ref::<InputError>(),
        Some(&InputError::Empty(Series::Observations))
    );
}

#[test]
fn wrapped_observations_animate_like_flat_ones() {
    let field = r#"{"X": [[0, 1]], "Y": [[0, 0]], "p": [[0, 1]], "u": [[0, 0]], "v": [[0, 0]]}"#;
    let flat = format!(
        r#"{{"sub_pos": [[0, 0], [1, 1]], "sub_noisy_pos": [[0.5, 0.5]],
            "filter_estimates": [[0, 0]], "field": {field}}}"#
    );
    let wrapped = flat.replace("[[0.5, 0.5]]", "[[[0.5, 0.5]]]");

    let flat: Scene = serde_json::from_str(&flat).unwrap();
    let wrapped: Scene = serde_json::from_str(&wrapped).unwrap();
    assert!(matches!(wrapped.sub_noisy_pos, PointList::Wrapped(_)));
    assert_eq!(
        flat.trajectories().unwrap(),
        wrapped.trajectories().unwrap()
    );
}
