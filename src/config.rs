// Render configuration: colors, block size, pattern knobs, feature flags, output size.
// Replaced wholesale, never mutated piecemeal by the renderer.

use crate::error::{Error, Result};
use std::str::FromStr;

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Soft charcoal used for the dots on light pages.
    pub const CHARCOAL: Rgb = Rgb::new(0x2a, 0x2a, 0x2a);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || Error::InvalidColor(format!("{s:?} is not #rgb or #rrggbb"));
        if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |i: usize, n: usize| u8::from_str_radix(&hex[i..i + n], 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Rgb::new(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            3 => {
                // #abc == #aabbcc
                let (r, g, b) = (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?);
                Ok(Rgb::new(r * 17, g * 17, b * 17))
            }
            _ => Err(bad()),
        }
    }

    /// From normalized [0,1] channels (values outside are rejected).
    pub fn from_unit(c: [f32; 3]) -> Result<Self> {
        if c.iter().any(|v| !v.is_finite() || !(0.0..=1.0).contains(v)) {
            return Err(Error::InvalidColor(format!("{c:?} has channels outside [0,1]")));
        }
        let q = |v: f32| (v * 255.0).round() as u8;
        Ok(Rgb::new(q(c[0]), q(c[1]), q(c[2])))
    }
}

impl FromStr for Rgb {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Rgb::from_hex(s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub foreground: Rgb,       // dot color
    pub background: Rgb,       // paper color
    pub pixel_size: usize,     // block side in pixels, >= 1
    pub pattern_scale: f64,    // noise coordinate multiplier
    pub pattern_density: f64,  // ~[0,1]; higher = more dots
    pub speed: f64,            // time multiplier per frame
    pub edge_fade: f64,        // >= 0; 0 disables the vignette
    pub enable_ripples: bool,
    pub enable_liquid: bool,
    pub width: usize,          // output size in pixels; 0 means "not laid out yet"
    pub height: usize,
}

impl Default for RenderConfig {
    /// Charcoal dots on white, matching the hero background.
    fn default() -> Self {
        Self {
            foreground: Rgb::CHARCOAL,
            background: Rgb::WHITE,
            pixel_size: 3,
            pattern_scale: 2.0,
            pattern_density: 0.7,
            speed: 0.3,
            edge_fade: 0.4,
            enable_ripples: false,
            enable_liquid: false,
            width: 0,
            height: 0,
        }
    }
}

impl RenderConfig {
    pub fn with_colors(mut self, foreground: Rgb, background: Rgb) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }
    pub fn with_pixel_size(mut self, pixel_size: usize) -> Self {
        self.pixel_size = pixel_size;
        self
    }
    pub fn with_pattern(mut self, scale: f64, density: f64) -> Self {
        self.pattern_scale = scale;
        self.pattern_density = density;
        self
    }
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }
    pub fn with_edge_fade(mut self, edge_fade: f64) -> Self {
        self.edge_fade = edge_fade;
        self
    }
    pub fn with_ripples(mut self, on: bool) -> Self {
        self.enable_ripples = on;
        self
    }
    pub fn with_liquid(mut self, on: bool) -> Self {
        self.enable_liquid = on;
        self
    }
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// True when there is nothing to draw into.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reject anything that would divide by zero, loop forever or produce NaN.
    pub fn validate(&self) -> Result<()> {
        if self.pixel_size == 0 {
            return Err(Error::InvalidConfig("pixel_size must be >= 1".into()));
        }
        if !self.pattern_scale.is_finite() || self.pattern_scale < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "pattern_scale must be finite and >= 0, got {}",
                self.pattern_scale
            )));
        }
        if !self.pattern_density.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "pattern_density must be finite, got {}",
                self.pattern_density
            )));
        }
        if !self.speed.is_finite() {
            return Err(Error::InvalidConfig(format!("speed must be finite, got {}", self.speed)));
        }
        if !self.edge_fade.is_finite() || self.edge_fade < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "edge_fade must be finite and >= 0, got {}",
                self.edge_fade
            )));
        }
        Ok(())
    }
}

/// Named configurations used across the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    Hero,
    Liquid,
    Ripple,
}

impl Preset {
    pub fn config(self) -> RenderConfig {
        match self {
            Preset::Hero => RenderConfig::default(),
            Preset::Liquid => RenderConfig::default()
                .with_colors(Rgb::WHITE, Rgb::BLACK)
                .with_pixel_size(4)
                .with_pattern(2.0, 1.0)
                .with_speed(0.5)
                .with_edge_fade(0.25)
                .with_liquid(true),
            Preset::Ripple => RenderConfig::default().with_pixel_size(4).with_ripples(true),
        }
    }
}

impl FromStr for Preset {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hero" => Ok(Preset::Hero),
            "liquid" => Ok(Preset::Liquid),
            "ripple" | "ripples" => Ok(Preset::Ripple),
            other => Err(Error::InvalidConfig(format!("unknown preset {other:?}"))),
        }
    }
}
