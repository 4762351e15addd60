// Ordered dithering + compositing.
// Visual: the flow field becomes a two-color pixel-block pattern, denser where the
// field is high, fading out towards the borders and rippling around the pointer.

use crate::config::{RenderConfig, Rgb};
use crate::flow::FlowMode;
use crate::types::{FrameBuffer, PointerState};

/// 8x8 Bayer index matrix; cell / 64 is the threshold.
pub const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Ripple reach in normalized buffer units (dx / width, dy / height).
pub const RIPPLE_RADIUS: f64 = 0.3;
const RIPPLE_STRENGTH: f64 = 0.3;
const RIPPLE_WAVENUMBER: f64 = 40.0;
const RIPPLE_SPEED: f64 = 4.0;

/// Threshold in [0,1) for block column `bx`, block row `by`.
#[inline]
pub fn threshold(bx: usize, by: usize) -> f64 {
    BAYER_8X8[by % 8][bx % 8] as f64 / 64.0
}

/// Remap a field value from [-1,1] to [0,1] and shape it by density.
/// Higher density lowers the exponent, so more blocks clear their threshold.
#[inline]
pub fn shape_density(field: f64, density: f64) -> f64 {
    let v = ((field + 1.0) * 0.5).max(0.0);
    v.powf(2.5 - density * 1.5)
}

/// Vignette factor in [0,1]: 0 on the border, 1 in the middle (for edge_fade > 0).
#[inline]
pub fn edge_factor(x: usize, y: usize, width: usize, height: usize, edge_fade: f64) -> f64 {
    if edge_fade <= 0.0 {
        return 1.0;
    }
    let fx = x as f64 / width as f64;
    let fy = y as f64 / height as f64;
    let edge_x = fx.min(1.0 - fx) * 2.0;
    let edge_y = fy.min(1.0 - fy) * 2.0;
    edge_x.min(edge_y).max(0.0).powf(edge_fade * 0.5)
}

/// Decaying sine ring around the pointer; zero outside RIPPLE_RADIUS.
#[inline]
pub fn ripple(dist: f64, time: f64) -> f64 {
    if dist >= RIPPLE_RADIUS {
        return 0.0;
    }
    (dist * RIPPLE_WAVENUMBER - time * RIPPLE_SPEED).sin() * (1.0 - dist / RIPPLE_RADIUS) * RIPPLE_STRENGTH
}

/// Shaped field value for the block whose origin is (x,y). This is the number
/// compared against the Bayer threshold.
pub fn block_value(cfg: &RenderConfig, x: usize, y: usize, time: f64, pointer: PointerState) -> f64 {
    let (w, h) = (cfg.width as f64, cfg.height as f64);

    // 1) Pattern space
    let nx = x as f64 / w * cfg.pattern_scale;
    let ny = y as f64 / h * cfg.pattern_scale;

    // 2) Flow field
    let mut value = FlowMode::from_liquid(cfg.enable_liquid).sample(nx, ny, time);

    // 3) Ripple from the pointer
    if cfg.enable_ripples && pointer.active {
        let dx = (x as f64 - pointer.x as f64) / w;
        let dy = (y as f64 - pointer.y as f64) / h;
        value += ripple(dx.hypot(dy), time);
    }

    // 4) Remap + density, 5) edge fade
    shape_density(value, cfg.pattern_density) * edge_factor(x, y, cfg.width, cfg.height, cfg.edge_fade)
}

/// Foreground (dot) or background for the block at origin (x,y).
pub fn classify(cfg: &RenderConfig, x: usize, y: usize, time: f64, pointer: PointerState) -> bool {
    let ps = cfg.pixel_size.max(1);
    block_value(cfg, x, y, time, pointer) > threshold(x / ps, y / ps)
}

/// Fill `fb` with one full frame. `fb` is resized to the configured output size.
/// An empty output size leaves an empty buffer.
pub fn render_into(fb: &mut FrameBuffer, cfg: &RenderConfig, time: f64, pointer: PointerState) {
    fb.resize(cfg.width, cfg.height);
    if cfg.is_empty() {
        return;
    }

    let ps = cfg.pixel_size.max(1);
    let (w, h) = (cfg.width, cfg.height);
    let fg = rgba(cfg.foreground);
    let bg = rgba(cfg.background);

    for y in (0..h).step_by(ps) {
        let block_h = ps.min(h - y);
        for x in (0..w).step_by(ps) {
            let color = if classify(cfg, x, y, time, pointer) { fg } else { bg };

            // Fill the block, clipped at the right/bottom edge.
            let block_w = ps.min(w - x);
            for py in y..y + block_h {
                let start = (py * w + x) * 4;
                for px in fb.pixels[start..start + block_w * 4].chunks_exact_mut(4) {
                    px.copy_from_slice(&color);
                }
            }
        }
    }
}

#[inline]
fn rgba(c: Rgb) -> [u8; 4] {
    [c.r, c.g, c.b, 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(w: usize, h: usize) -> RenderConfig {
        RenderConfig::default()
            .with_colors(Rgb::BLACK, Rgb::WHITE)
            .with_pixel_size(4)
            .with_pattern(2.0, 0.7)
            .with_edge_fade(0.0)
            .with_size(w, h)
    }

    #[test]
    fn bayer_is_a_permutation_of_0_to_63() {
        let mut seen = [false; 64];
        for row in BAYER_8X8.iter() {
            for &v in row.iter() {
                seen[v as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn threshold_wraps_every_8_blocks() {
        assert_eq!(threshold(0, 0), 0.0);
        assert_eq!(threshold(1, 0), 0.5);
        assert_eq!(threshold(9, 8), threshold(1, 0));
        assert!(threshold(0, 7) < 1.0);
    }

    #[test]
    fn density_exponent() {
        // density 1 => exponent 1: identity on the remapped value
        assert!((shape_density(0.0, 1.0) - 0.5).abs() < 1e-12);
        // density 0 => exponent 2.5
        assert!((shape_density(0.0, 0.0) - 0.5f64.powf(2.5)).abs() < 1e-12);
        // below -1 clamps to zero instead of NaN
        assert_eq!(shape_density(-1.4, 0.3), 0.0);
    }

    #[test]
    fn edge_factor_profile() {
        assert_eq!(edge_factor(0, 50, 100, 100, 0.4), 0.0);
        assert!((edge_factor(50, 50, 100, 100, 0.4) - 1.0).abs() < 1e-12);
        assert_eq!(edge_factor(0, 0, 100, 100, 0.0), 1.0);
        let near = edge_factor(5, 50, 100, 100, 0.4);
        let mid = edge_factor(25, 50, 100, 100, 0.4);
        assert!(near < mid);
    }

    #[test]
    fn ripple_is_confined() {
        assert_eq!(ripple(RIPPLE_RADIUS, 1.0), 0.0);
        assert_eq!(ripple(1.0, 1.0), 0.0);
        // at the center: sin(-4t) * 0.3
        assert!((ripple(0.0, 0.5) - (-2.0f64).sin() * 0.3).abs() < 1e-12);
    }

    #[test]
    fn clipped_blocks_stay_in_bounds() {
        let mut fb = FrameBuffer::new(0, 0);
        let c = cfg(10, 7).with_pixel_size(4);
        render_into(&mut fb, &c, 0.0, PointerState::default());
        assert_eq!(fb.pixels.len(), 10 * 7 * 4);
        assert!(fb.pixels.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn block_is_uniform() {
        let mut fb = FrameBuffer::new(0, 0);
        let c = cfg(64, 64);
        render_into(&mut fb, &c, 1.25, PointerState::default());
        for by in (0..64).step_by(4) {
            for bx in (0..64).step_by(4) {
                let first = fb.rgba(bx, by);
                for py in by..by + 4 {
                    for px in bx..bx + 4 {
                        assert_eq!(fb.rgba(px, py), first);
                    }
                }
            }
        }
    }

    #[test]
    fn empty_size_renders_nothing() {
        let mut fb = FrameBuffer::new(3, 3);
        render_into(&mut fb, &cfg(0, 20), 0.0, PointerState::default());
        assert!(fb.pixels.is_empty());
    }

    #[test]
    fn pixel_size_one_works() {
        let mut fb = FrameBuffer::new(0, 0);
        render_into(&mut fb, &cfg(17, 5).with_pixel_size(1), 0.0, PointerState::default());
        assert_eq!(fb.pixels.len(), 17 * 5 * 4);
    }
}
