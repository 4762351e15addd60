// Save a rendered frame as a PNG.
// Visual: the file looks exactly like the window at the moment S was pressed
// (at buffer resolution, before the window's 2x upscale).

use crate::error::{Error, Result};
use crate::types::FrameBuffer;
use image::RgbaImage;
use std::path::Path;

/// Copy the frame into an `image` buffer.
pub fn to_image(frame: &FrameBuffer) -> Result<RgbaImage> {
    RgbaImage::from_raw(frame.width as u32, frame.height as u32, frame.pixels.clone()).ok_or_else(|| {
        Error::InvalidConfig(format!(
            "frame is {}x{} but holds {} bytes",
            frame.width,
            frame.height,
            frame.pixels.len()
        ))
    })
}

/// Write `frame` to `path`; the format follows the extension.
pub fn save_png(frame: &FrameBuffer, path: &Path) -> Result<()> {
    to_image(frame)?.save(path)?;
    Ok(())
}
