// Layered fBm flows: the scalar field the ditherer thresholds.
// Each mode is a small table of layers so the tuning constants live in data.

use crate::noise::fbm;

/// One fBm evaluation inside a flow:
/// `weight * fbm(nx*frequency + phase.0 + t*drift.0, ny*frequency + phase.1 + t*drift.1, octaves)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowLayer {
    pub weight: f64,
    pub frequency: f64,
    pub octaves: u32,
    pub phase: (f64, f64),
    pub drift: (f64, f64),
}

/// Slow two-layer traveling wave. The second layer runs at double frequency,
/// shifted off the first layer's lattice and drifting the other way in x.
pub const STANDARD_LAYERS: [FlowLayer; 2] = [
    FlowLayer { weight: 1.0, frequency: 1.0, octaves: 4, phase: (0.0, 0.0), drift: (0.08, 0.04) },
    FlowLayer { weight: 0.3, frequency: 2.0, octaves: 3, phase: (17.31, 5.87), drift: (-0.05, 0.03) },
];

/// Faster, more turbulent three-layer variant.
pub const LIQUID_LAYERS: [FlowLayer; 3] = [
    FlowLayer { weight: 1.0, frequency: 1.0, octaves: 5, phase: (0.0, 0.0), drift: (0.15, 0.08) },
    FlowLayer { weight: 0.4, frequency: 2.0, octaves: 4, phase: (0.0, 0.0), drift: (-0.1, 0.05) },
    FlowLayer { weight: 0.2, frequency: 4.0, octaves: 3, phase: (0.0, 0.0), drift: (0.2, -0.1) },
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowMode {
    #[default]
    Standard,
    Liquid,
}

impl FlowMode {
    pub fn from_liquid(enable_liquid: bool) -> Self {
        if enable_liquid { FlowMode::Liquid } else { FlowMode::Standard }
    }

    pub fn layers(self) -> &'static [FlowLayer] {
        match self {
            FlowMode::Standard => &STANDARD_LAYERS,
            FlowMode::Liquid => &LIQUID_LAYERS,
        }
    }

    /// Field value at pattern-space (nx, ny) and time t. Roughly [-1.5, 1.5]
    /// before the caller remaps it.
    pub fn sample(self, nx: f64, ny: f64, t: f64) -> f64 {
        self.layers().iter().map(|l| l.sample(nx, ny, t)).sum()
    }
}

impl FlowLayer {
    #[inline]
    pub fn sample(&self, nx: f64, ny: f64, t: f64) -> f64 {
        let x = nx * self.frequency + self.phase.0 + t * self.drift.0;
        let y = ny * self.frequency + self.phase.1 + t * self.drift.1;
        self.weight * fbm(x, y, self.octaves)
    }
}
