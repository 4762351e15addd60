// Core types shared by the renderer, the driver and the window host.

/// Row-major RGBA8 frame. Fully overwritten by every render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the frame is (pixels)
    pub height: usize,    // how tall the frame is (pixels)
    pub pixels: Vec<u8>,  // length = width * height * 4, [r, g, b, a] per pixel
}

impl FrameBuffer {
    /// Allocate a zeroed (transparent black) frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u8; width * height * 4] }
    }

    /// Reuse the allocation when possible; contents are unspecified afterwards.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.resize(width * height * 4, 0);
    }

    /// RGBA of the pixel at (x,y), or None outside the frame.
    pub fn rgba(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2], self.pixels[idx + 3]])
    }

    /// Pack into 0x00RRGGBB words for minifb, reusing `out`.
    pub fn pack_0rgb(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.pixels.chunks_exact(4).map(|px| {
            ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32
        }));
    }
}

/// Last known pointer position in buffer pixels, plus whether it is over the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

impl PointerState {
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, active: true }
    }
}
