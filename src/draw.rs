// Window host.
// Visual effects provided here:
// 1) A resizable window that shows the dithered background, upscaled 2x so
//    every buffer pixel is a crisp square.
// 2) The pointer position fed back to the renderer for ripples.
// 3) Keyboard shortcuts for pausing, switching flows and taking snapshots.

use crate::driver::Surface;
use crate::error::{Error, Result};
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, MouseMode, Scale, Window, WindowOptions};

/// Window pixels per buffer pixel (the buffer is rendered at half resolution).
pub const SCALE: usize = 2;

/// What the user asked for this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    ToggleLiquid,
    ToggleRipples,
    Snapshot,
}

pub struct Drawer {
    window: Window,    // the on-screen window you see
    packed: Vec<u32>,  // 0x00RRGGBB scratch for minifb, reused every frame
}

impl Drawer {
    /// Create a window whose *buffer* is `width` x `height`; the window itself is SCALE times bigger.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let options = WindowOptions { resize: true, scale: Scale::X2, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, packed: Vec::with_capacity(width * height) })
    }

    /// Returns false when the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Keys pressed since the last poll (no auto-repeat).
    pub fn commands(&self) -> Vec<Command> {
        [
            (Key::Space, Command::TogglePause),
            (Key::L, Command::ToggleLiquid),
            (Key::R, Command::ToggleRipples),
            (Key::S, Command::Snapshot),
        ]
        .into_iter()
        .filter(|(key, _)| self.window.is_key_pressed(*key, KeyRepeat::No))
        .map(|(_, cmd)| cmd)
        .collect()
    }
}

impl Surface for Drawer {
    /// Buffer size that fills the window at the current size.
    fn size(&self) -> (usize, usize) {
        let (w, h) = self.window.get_size();
        (w / SCALE, h / SCALE)
    }

    /// Pointer in buffer pixels; None when it is outside the window.
    fn pointer(&self) -> Option<(f32, f32)> {
        self.window
            .get_unscaled_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x / SCALE as f32, y / SCALE as f32))
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new pattern.
    fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        frame.pack_0rgb(&mut self.packed);
        self.window
            .update_with_buffer(&self.packed, frame.width, frame.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        Drawer::is_open(self) && !self.esc_pressed()
    }
}
