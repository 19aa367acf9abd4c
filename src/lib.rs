pub mod camera;
pub mod config;
pub mod evaluator;
pub mod gl_wrap;
pub mod params;
pub mod points;
pub mod shapes;
pub mod signal;
pub mod vis_build;
pub mod vis_ctx;
pub mod vis_gl;

pub use config::VisConfig;
pub use evaluator::{Evaluator, RenderedPoint};
pub use params::{FrameParams, Template};
pub use signal::{ControlLoop, GestureSignal, SignalSource};
pub use vis_build::{VisBuilder, VisError};
