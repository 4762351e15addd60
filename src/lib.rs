//! Procedural dithered noise backgrounds.
//!
//! A layered fBm flow field is thresholded per pixel block against an 8x8 Bayer
//! matrix and written as a two-color RGBA frame. [`DitherRenderer`] owns the
//! animation clock and pointer; [`FrameDriver`] runs it against any [`Surface`].

pub mod config;
pub mod dither;
pub mod draw;
pub mod driver;
pub mod error;
pub mod flow;
pub mod noise;
pub mod renderer;
pub mod snapshot;
pub mod types;

pub use config::{Preset, RenderConfig, Rgb};
pub use driver::{FrameDriver, Surface};
pub use error::{Error, Result};
pub use renderer::DitherRenderer;
pub use types::{FrameBuffer, PointerState};
