//! Draws a flow field with a vehicle's trajectory, noisy observations of it, and particle filter
//! state on top, either as a single figure or as a video.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod animation;
mod artist;
mod figure;
mod layers;
mod plotter;
mod static_plot;
pub mod style;
pub mod video;

pub use self::animation::{make_animation, make_animation_into, AnimationOptions};
pub use self::artist::{Artist, Mark};
pub use self::figure::{ArtistID, Figure, FigureOptions};
pub use self::layers::FieldStyle;
pub use self::plotter::{plotter, PlotterOptions};
pub use self::static_plot::{render_static, Display, SavePng};
pub use self::video::FrameSink;
