use ::noise::{Fbm, MultiFractal as _, NoiseFn as _, Perlin};

/// Deterministic smooth noise oracle over ℝ³.
///
/// Implementations must return values in `[0, 1]`, identical for identical inputs, and vary
/// continuously with the input.
pub trait NoiseField: Send + Sync {
    /// Sample the field at `(x, y, z)`.
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Number of octaves summed by [`FbmNoise`].
pub const FBM_OCTAVES: usize = 4;
/// Amplitude falloff between octaves.
pub const FBM_PERSISTENCE: f64 = 0.5;

/// Fractal Perlin noise remapped to `[0, 1]`.
///
/// Four octaves with amplitude halving per octave, the classic creative-coding noise detail.
#[derive(Clone, Debug)]
pub struct FbmNoise {
    seed: u32,
    fbm: Fbm<Perlin>,
}

impl FbmNoise {
    /// Build a field from a seed.
    pub fn new(seed: u32) -> Self {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(FBM_OCTAVES)
            .set_persistence(FBM_PERSISTENCE)
            .set_frequency(1.0);
        Self { seed, fbm }
    }

    /// Seed the field was built with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for FbmNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NoiseField for FbmNoise {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let v = self.fbm.get([x, y, z]);
        if !v.is_finite() {
            return 0.5;
        }
        ((v + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Field returning the same value everywhere. Useful to isolate the other displacement terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantNoise(pub f64);

impl NoiseField for ConstantNoise {
    fn sample(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0.clamp(0.0, 1.0)
    }
}
