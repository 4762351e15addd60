// The renderer instance: owns the configuration, the animation clock, the
// pointer state and the reusable output buffer.

use crate::config::RenderConfig;
use crate::dither;
use crate::error::Result;
use crate::types::{FrameBuffer, PointerState};
use log::debug;

/// Fixed per-frame time step the animation assumes (~60 Hz).
pub const FRAME_DT: f64 = 0.016;

pub struct DitherRenderer {
    config: RenderConfig,
    time: f64,              // seconds of animation, only ever increases
    pointer: PointerState,
    paused: bool,
    buffer: FrameBuffer,
}

impl DitherRenderer {
    /// Validate and take ownership of `config`. The clock starts at 0.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            buffer: FrameBuffer::new(0, 0),
            config,
            time: 0.0,
            pointer: PointerState::default(),
            paused: false,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Replace the whole configuration. On error the old one stays in effect.
    /// The animation clock and pointer are kept.
    pub fn set_config(&mut self, config: RenderConfig) -> Result<()> {
        config.validate()?;
        debug!("config replaced: {:?}", config);
        self.config = config;
        Ok(())
    }

    /// New output size; takes effect on the next render as a whole.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.config.width, self.config.height) {
            debug!("resize {}x{} -> {}x{}", self.config.width, self.config.height, width, height);
            self.config.width = width;
            self.config.height = height;
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze (or resume) the clock; rendering still works.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Advance the clock by `speed * frame_dt`. Non-finite or negative steps
    /// (and negative speeds) are ignored so time never runs backwards.
    pub fn advance(&mut self, frame_dt: f64) {
        if self.paused || !frame_dt.is_finite() || frame_dt <= 0.0 {
            return;
        }
        let step = self.config.speed * frame_dt;
        if step > 0.0 {
            self.time += step;
        }
    }

    /// Pointer moved over the surface, in buffer pixels.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = PointerState::at(x, y);
    }

    /// Pointer left the surface: ripples stop.
    pub fn pointer_leave(&mut self) {
        self.pointer.active = false;
    }

    /// Render a frame at the current time. None while the output is 0-sized.
    pub fn render(&mut self) -> Option<&FrameBuffer> {
        self.render_at(self.time)
    }

    /// Render a frame at an explicit time (the clock is not touched).
    pub fn render_at(&mut self, time: f64) -> Option<&FrameBuffer> {
        if self.config.is_empty() {
            return None;
        }
        dither::render_into(&mut self.buffer, &self.config, time, self.pointer);
        Some(&self.buffer)
    }

    /// Shaped field value of the block at origin (x,y) at the current time,
    /// with the current pointer.
    pub fn sample(&self, x: usize, y: usize) -> f64 {
        dither::block_value(&self.config, x, y, self.time, self.pointer)
    }
}
