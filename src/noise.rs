// 2D gradient (Perlin) noise and fractal Brownian motion on top of it.
// Pure functions; the permutation table is a frozen static.

/// Ken Perlin's reference permutation of 0..=255.
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// The permutation repeated twice so `P[i + 1]` never needs a wrap check.
static P: [u8; 512] = doubled(PERMUTATION);

const fn doubled(src: [u8; 256]) -> [u8; 512] {
    let mut out = [0u8; 512];
    let mut i = 0;
    while i < 256 {
        out[i] = src[i];
        out[i + 256] = src[i];
        i += 1;
    }
    out
}

/// Quintic smoothstep 6t^5 - 15t^4 + 10t^3.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product with one of four diagonal gradients picked by the low two bits.
#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 3;
    let (u, v) = if h < 2 { (x, y) } else { (y, x) };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// Gradient noise at (x, y), in [-1, 1]. Same input, same output.
pub fn noise2d(x: f64, y: f64) -> f64 {
    let (xf, yf) = (x.floor(), y.floor());
    // Cast through i64 so negative cells wrap like two's complement `& 255`.
    let cx = (xf as i64 & 255) as usize;
    let cy = (yf as i64 & 255) as usize;

    let (x, y) = (x - xf, y - yf);
    let u = fade(x);
    let v = fade(y);

    let a = P[cx] as usize + cy;
    let b = P[cx + 1] as usize + cy;

    lerp(
        lerp(grad(P[a], x, y), grad(P[b], x - 1.0, y), u),
        lerp(grad(P[a + 1], x, y - 1.0), grad(P[b + 1], x - 1.0, y - 1.0), u),
        v,
    )
}

/// Default octave count for a single fBm layer.
pub const DEFAULT_OCTAVES: u32 = 4;

/// Fractal Brownian motion: `octaves` layers of noise, amplitude halving and
/// frequency doubling, normalized by the amplitude sum.
pub fn fbm(x: f64, y: f64, octaves: u32) -> f64 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        value += amplitude * noise2d(x * frequency, y * frequency);
        max_value += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }

    if max_value == 0.0 { 0.0 } else { value / max_value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubled_table_repeats() {
        for i in 0..256 {
            assert_eq!(P[i], P[i + 256]);
        }
        let mut seen = [false; 256];
        for &v in PERMUTATION.iter() {
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "permutation must cover 0..=255");
    }

    #[test]
    fn fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert!((fade(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn noise_is_zero_on_lattice_points() {
        // All gradient dot products vanish at integer corners.
        for (x, y) in [(0.0, 0.0), (3.0, 7.0), (-5.0, 2.0), (255.0, 256.0)] {
            assert_eq!(noise2d(x, y), 0.0);
        }
    }

    #[test]
    fn noise_is_deterministic() {
        let a = noise2d(1.234, -5.678);
        let b = noise2d(1.234, -5.678);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn noise_wraps_every_256_cells() {
        let a = noise2d(3.3, 4.7);
        let b = noise2d(3.3 + 256.0, 4.7);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn fbm_zero_octaves_is_zero() {
        assert_eq!(fbm(0.3, 0.9, 0), 0.0);
    }

    #[test]
    fn fbm_single_octave_equals_noise() {
        let (x, y) = (0.37, 1.91);
        assert!((fbm(x, y, 1) - noise2d(x, y)).abs() < 1e-12);
    }

    #[test]
    fn fbm_stays_bounded() {
        let mut s = 0x9E37_79B9u32;
        for _ in 0..2000 {
            s ^= s << 13;
            s ^= s >> 17;
            s ^= s << 5;
            let x = (s % 10_000) as f64 / 37.0 - 100.0;
            let y = (s / 10_000 % 10_000) as f64 / 41.0 - 100.0;
            let v = fbm(x, y, 6);
            assert!((-1.01..=1.01).contains(&v), "fbm({x},{y}) = {v}");
        }
    }
}
