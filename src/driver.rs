// Frame driver: one tick = sync size and pointer, advance time, render, present.
// Stopping is simply not ticking again.

use crate::error::Result;
use crate::renderer::{DitherRenderer, FRAME_DT};
use crate::types::FrameBuffer;
use log::info;
use std::time::{Duration, Instant};

/// Something that can show a frame: a window, a test double, an offscreen target.
pub trait Surface {
    /// Current drawable size in buffer pixels (0 while not laid out).
    fn size(&self) -> (usize, usize);

    /// Pointer over the surface in buffer pixels, None when it is outside.
    fn pointer(&self) -> Option<(f32, f32)>;

    /// Push one frame to the screen.
    fn present(&mut self, frame: &FrameBuffer) -> Result<()>;

    /// False once the user closed the surface.
    fn is_open(&self) -> bool {
        true
    }
}

pub struct FrameDriver {
    renderer: DitherRenderer,
    running: bool,
    frames: u64,
    // FPS bookkeeping
    last_fps_time: Instant,
    frames_this_second: u32,
    fps: f32,
}

impl FrameDriver {
    pub fn new(renderer: DitherRenderer) -> Self {
        Self {
            renderer,
            running: false,
            frames: 0,
            last_fps_time: Instant::now(),
            frames_this_second: 0,
            fps: 0.0,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            info!("frame driver started");
            self.last_fps_time = Instant::now();
            self.frames_this_second = 0;
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("frame driver stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn renderer(&self) -> &DitherRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut DitherRenderer {
        &mut self.renderer
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one scheduling tick. Returns Ok(true) when a frame was presented;
    /// Ok(false) when stopped, closed or the surface has no area yet.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }
        if !surface.is_open() {
            self.stop();
            return Ok(false);
        }

        // 1) Size first, so the whole frame uses one set of dimensions.
        let (w, h) = surface.size();
        self.renderer.resize(w, h);

        // 2) Pointer
        match surface.pointer() {
            Some((x, y)) => self.renderer.pointer_move(x, y),
            None => self.renderer.pointer_leave(),
        }

        // 3) Clock, 4) render, 5) present
        self.renderer.advance(FRAME_DT);
        let Some(frame) = self.renderer.render() else {
            return Ok(false);
        };
        surface.present(frame)?;
        self.frames += 1;

        self.count_fps();
        Ok(true)
    }

    fn count_fps(&mut self) {
        self.frames_this_second += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_time);
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frames_this_second as f32 / elapsed.as_secs_f32();
            info!("FPS: {:.1}", self.fps);
            self.frames_this_second = 0;
            self.last_fps_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::error::Error;
    use crate::types::PointerState;

    /// Headless surface that records what it was shown.
    struct Headless {
        size: (usize, usize),
        pointer: Option<(f32, f32)>,
        open: bool,
        presented: Vec<(usize, usize, usize)>,
        fail: bool,
    }

    impl Headless {
        fn new(w: usize, h: usize) -> Self {
            Self { size: (w, h), pointer: None, open: true, presented: Vec::new(), fail: false }
        }
    }

    impl Surface for Headless {
        fn size(&self) -> (usize, usize) {
            self.size
        }
        fn pointer(&self) -> Option<(f32, f32)> {
            self.pointer
        }
        fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
            if self.fail {
                return Err(Error::WindowUpdate("headless failure".into()));
            }
            self.presented.push((frame.width, frame.height, frame.pixels.len()));
            Ok(())
        }
        fn is_open(&self) -> bool {
            self.open
        }
    }

    fn driver() -> FrameDriver {
        FrameDriver::new(DitherRenderer::new(RenderConfig::default()).unwrap())
    }

    #[test]
    fn stopped_driver_does_nothing() {
        let mut d = driver();
        let mut s = Headless::new(20, 10);
        assert!(!d.tick(&mut s).unwrap());
        assert!(s.presented.is_empty());
        assert_eq!(d.renderer().time(), 0.0);
    }

    #[test]
    fn tick_advances_renders_presents() {
        let mut d = driver();
        let mut s = Headless::new(20, 10);
        d.start();
        assert!(d.tick(&mut s).unwrap());
        assert!(d.tick(&mut s).unwrap());
        assert_eq!(s.presented, vec![(20, 10, 800), (20, 10, 800)]);
        assert_eq!(d.frames(), 2);
        assert!(d.renderer().time() > 0.0);
    }

    #[test]
    fn zero_sized_surface_skips_frames() {
        let mut d = driver();
        let mut s = Headless::new(0, 0);
        d.start();
        assert!(!d.tick(&mut s).unwrap());
        s.size = (6, 6);
        assert!(d.tick(&mut s).unwrap());
        assert_eq!(s.presented.len(), 1);
    }

    #[test]
    fn resize_between_ticks() {
        let mut d = driver();
        let mut s = Headless::new(8, 8);
        d.start();
        d.tick(&mut s).unwrap();
        s.size = (5, 3);
        d.tick(&mut s).unwrap();
        assert_eq!(s.presented[1], (5, 3, 60));
    }

    #[test]
    fn pointer_follows_surface() {
        let mut d = driver();
        let mut s = Headless::new(8, 8);
        d.start();
        s.pointer = Some((2.0, 3.0));
        d.tick(&mut s).unwrap();
        assert_eq!(d.renderer().pointer(), PointerState::at(2.0, 3.0));
        s.pointer = None;
        d.tick(&mut s).unwrap();
        assert!(!d.renderer().pointer().active);
    }

    #[test]
    fn closed_surface_stops_driver() {
        let mut d = driver();
        let mut s = Headless::new(8, 8);
        d.start();
        s.open = false;
        assert!(!d.tick(&mut s).unwrap());
        assert!(!d.is_running());
    }

    #[test]
    fn present_errors_propagate() {
        let mut d = driver();
        let mut s = Headless::new(8, 8);
        s.fail = true;
        d.start();
        assert!(matches!(d.tick(&mut s), Err(Error::WindowUpdate(_))));
    }
}
