use std::path::PathBuf;

use structopt::StructOpt;

use model::AlignmentPolicy;
use render::PlotterOptions;

/// Plot a particle filter tracking a vehicle through a flow field, and optionally animate it.
#[derive(StructOpt)]
pub struct Args {
    /// The path to a JSON scene with the trajectories, particle sets, and flow field
    #[structopt(long, parse(from_os_str))]
    pub scene: PathBuf,
    #[structopt(long)]
    pub title: Option<String>,
    /// Figure width in inches
    #[structopt(long)]
    pub width: Option<f64>,
    /// Figure height in inches
    #[structopt(long)]
    pub height: Option<f64>,
    #[structopt(long)]
    pub dpi: Option<u32>,
    /// After showing the figure, render a video of the filter running
    #[structopt(long)]
    pub animate: bool,
    /// Where to write the video. `.gif` is encoded directly; anything else goes through ffmpeg.
    #[structopt(long, parse(from_os_str))]
    pub animation_path: Option<PathBuf>,
    /// Milliseconds between frames of the video
    #[structopt(long)]
    pub animation_interval: Option<u32>,
    /// Refuse to animate series whose length doesn't evenly divide the true path's
    #[structopt(long)]
    pub strict_alignment: bool,
    /// Write the figure to this PNG instead of opening a window
    #[structopt(long, parse(from_os_str))]
    pub save: Option<PathBuf>,
}

impl Args {
    pub fn options(&self) -> PlotterOptions {
        let mut options = PlotterOptions::default();
        if let Some(ref title) = self.title {
            options.title = title.clone();
        }
        if let Some(width) = self.width {
            options.figsize.0 = width;
        }
        if let Some(height) = self.height {
            options.figsize.1 = height;
        }
        if let Some(dpi) = self.dpi {
            options.dpi = dpi;
        }
        options.animate = self.animate;
        if let Some(ref path) = self.animation_path {
            options.animation_path = path.clone();
        }
        if let Some(interval) = self.animation_interval {
            options.animation_interval = interval;
        }
        if self.strict_alignment {
            options.alignment = AlignmentPolicy::Strict;
        }
        options
    }
}
