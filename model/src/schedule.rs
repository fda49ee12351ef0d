//! Aligns series of different lengths to the frames of an animation.
//!
//! Every frame shows one more point of the true path. The other series are sparser, so each gets
//! an integer interval `frames / len`, computed once, and only updates on frames that are a
//! multiple of it.

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::Trajectories;

/// The series that feed an animation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Series {
    TruePath,
    Observations,
    Estimates,
    Predictions,
    Resamples,
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Series::TruePath => "true path",
            Series::Observations => "noisy observations",
            Series::Estimates => "filter estimates",
            Series::Predictions => "particle predictions",
            Series::Resamples => "particle resamples",
        };
        write!(f, "{name}")
    }
}

/// Input that can't be animated. Raised before any frame is rendered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("the {0} series is empty")]
    Empty(Series),
    #[error("the {series} series has {len} samples, more than the {frames} frames of the true path")]
    TooLong {
        series: Series,
        len: usize,
        frames: usize,
    },
    #[error("{len} {series} don't divide evenly into {frames} frames")]
    Uneven {
        series: Series,
        len: usize,
        frames: usize,
    },
    #[error("there are {len} particle prediction sets, but {frames} frames need one each")]
    MissingPredictions { len: usize, frames: usize },
}

/// What to do when a series length doesn't divide the number of frames
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignmentPolicy {
    /// Floor the interval. The gate then fires more often than there are samples; extra firings
    /// keep showing the final sample. Trailing samples of the shorter series can go unseen.
    Truncate,
    /// Refuse to animate
    Strict,
}

impl Default for AlignmentPolicy {
    fn default() -> Self {
        AlignmentPolicy::Truncate
    }
}

/// Decides on which frames one series updates, and which of its samples to show then.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gate {
    interval: usize,
    len: usize,
}

impl Gate {
    fn new(series: Series, len: usize, frames: usize, policy: AlignmentPolicy) -> Result<Self> {
        if len == 0 {
            return Err(InputError::Empty(series).into());
        }
        if len > frames {
            return Err(InputError::TooLong {
                series,
                len,
                frames,
            }
            .into());
        }
        if frames % len != 0 {
            match policy {
                AlignmentPolicy::Strict => {
                    return Err(InputError::Uneven {
                        series,
                        len,
                        frames,
                    }
                    .into());
                }
                AlignmentPolicy::Truncate => {
                    warn!(
                        "{len} {series} don't divide evenly into {frames} frames; the interval \
                         is rounded down to {}",
                        frames / len
                    );
                }
            }
        }
        Ok(Self {
            interval: frames / len,
            len,
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Does this series update on frame `i`?
    pub fn fires(&self, i: usize) -> bool {
        i % self.interval == 0
    }

    /// The raw sample index for frame `i`. Past the end of the series when the length doesn't
    /// divide the frame count.
    pub fn index(&self, i: usize) -> usize {
        i / self.interval
    }

    /// How many leading samples are revealed on frame `i`
    pub fn revealed(&self, i: usize) -> usize {
        self.index(i).min(self.len)
    }

    /// The sample highlighted on frame `i`
    pub fn current(&self, i: usize) -> usize {
        self.index(i).min(self.len - 1)
    }
}

/// The gates of all interval-driven series, computed once per animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intervals {
    pub frames: usize,
    pub observations: Gate,
    pub estimates: Gate,
    pub resamples: Gate,
}

impl Intervals {
    pub fn new(series: &Trajectories, policy: AlignmentPolicy) -> Result<Self> {
        let frames = series.true_path.len();
        if frames == 0 {
            return Err(InputError::Empty(Series::TruePath).into());
        }
        let observations = Gate::new(
            Series::Observations,
            series.observations.len(),
            frames,
            policy,
        )?;
        let estimates = Gate::new(Series::Estimates, series.estimates.len(), frames, policy)?;
        let resamples = Gate::new(Series::Resamples, series.resamples.len(), frames, policy)?;
        if series.predictions.len() < frames {
            return Err(InputError::MissingPredictions {
                len: series.predictions.len(),
                frames,
            }
            .into());
        }
        Ok(Self {
            frames,
            observations,
            estimates,
            resamples,
        })
    }
}
