use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use model::{AlignmentPolicy, Scene};

use crate::animation::{make_animation, AnimationOptions};
use crate::figure::FigureOptions;
use crate::static_plot::{render_static, Display};

/// Everything about presentation that a caller can choose
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlotterOptions {
    pub title: String,
    /// Width and height in inches
    pub figsize: (f64, f64),
    pub dpi: u32,
    pub animate: bool,
    pub animation_path: PathBuf,
    /// Milliseconds between frames
    pub animation_interval: u32,
    pub alignment: AlignmentPolicy,
}

impl Default for PlotterOptions {
    fn default() -> Self {
        Self {
            title: "Particle Filter on Submarine Trajectory".to_string(),
            figsize: (11.0, 7.0),
            dpi: 250,
            animate: false,
            animation_path: PathBuf::from("particle_ani.mp4"),
            animation_interval: 35,
            alignment: AlignmentPolicy::Truncate,
        }
    }
}

impl PlotterOptions {
    pub fn static_figure(&self) -> FigureOptions {
        FigureOptions {
            title: self.title.clone(),
            figsize: self.figsize,
            dpi: self.dpi,
            title_pt: 14.0,
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            label_pt: 12.0,
        }
    }

    pub fn animation(&self) -> AnimationOptions {
        AnimationOptions {
            figure: FigureOptions {
                title: self.title.clone(),
                figsize: self.figsize,
                dpi: self.dpi,
                ..Default::default()
            },
            interval_ms: self.animation_interval,
            path: self.animation_path.clone(),
            alignment: self.alignment,
        }
    }
}

/// Plots the whole scene and shows it, then animates it if asked to.
pub fn plotter(scene: &Scene, options: &PlotterOptions, display: &mut dyn Display) -> Result<()> {
    let series = scene.trajectories()?;

    {
        let figure = render_static(&series, &scene.field, &options.static_figure())?;
        let pixels = figure.render()?;
        display.show(&figure, &pixels)?;
    }

    if options.animate {
        make_animation(&series, &scene.field, &options.animation())?;
    }
    Ok(())
}
