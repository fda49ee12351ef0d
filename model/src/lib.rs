#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

pub mod contour;
mod bounds;
mod field;
mod frame;
mod grid;
mod points;
mod pt;
mod scene;
mod schedule;

pub use self::bounds::Bounds;
pub use self::field::{FlowField, QuiverSample};
pub use self::frame::{EstimateUpdate, FrameState, FrameUpdate, Visible};
pub use self::grid::Grid;
pub use self::points::PointList;
pub use self::pt::{PointSet, Pt2D};
pub use self::scene::{Scene, Trajectories};
pub use self::schedule::{AlignmentPolicy, Gate, InputError, Intervals, Series};
