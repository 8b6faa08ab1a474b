use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{EtherError, EtherResult};
use crate::render::color::Hsba;

/// Immutable animation parameters, supplied once at startup.
///
/// Missing JSON fields fall back to [`Config::default`], whose values reproduce the reference
/// "ethereal blue loop" look.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of bands drawn per frame.
    pub num_bands: u32,
    /// Number of samples in the outline ring.
    pub sample_count: usize,

    /// Diameter of the circle traced through noise space.
    pub noise_scale: f64,
    /// Maximum radial noise displacement (the span is `-0.5 * range ..= range`).
    pub noise_range: f64,
    /// Per-band offset applied to both planar noise coordinates.
    pub band_decorrelation: f64,
    /// Seed of the noise oracle.
    pub noise_seed: u32,

    /// Width of the ribbon the bands are spread across.
    pub thickness: f64,
    /// Wave amplitude.
    pub wave_amp: f64,
    /// Wave frequency along the outline.
    pub wave_freq_angle: f64,
    /// Wave frequency in time (released mode).
    pub wave_freq_time: f64,

    /// Time step per frame.
    pub speed: f64,
    /// Noise time rate while released.
    pub noise_time_scale: f64,
    /// Noise time rate while the pointer is held down.
    pub noise_time_scale_pressed: f64,
    /// Global rotation in radians per frame.
    pub rotation_speed: f64,

    /// Base hue while released.
    pub color_hue: f64,
    /// Target hue while pressed.
    pub color_hue_pressed: f64,
    /// Fraction of the remaining hue distance covered per frame.
    pub hue_smoothing: f64,
    /// Amplitude of the per-band hue modulation.
    pub hue_swing: f64,
    /// Stroke saturation, 0..=100.
    pub saturation: f64,
    /// Stroke brightness, 0..=100.
    pub brightness: f64,
    /// Lower bound of the per-band alpha.
    pub alpha_min: f64,
    /// Upper bound of the per-band alpha.
    pub alpha_max: f64,
    /// Stroke width in outline units.
    pub stroke_weight: f64,
    /// Background cleared every frame.
    pub background: Hsba,

    /// Pull strength of the pointer.
    pub pointer_influence: f64,
    /// Radius of the pointer influence disc, in screen pixels.
    pub pointer_radius: f64,
    /// Falloff exponent of the pull.
    pub pointer_falloff: f64,

    /// Overall scale reached at full progress.
    pub progress_size_scale: f64,
    /// Surface size at which the responsive scale is 1.
    pub reference_size: f64,

    /// Generate bands on the rayon pool.
    pub parallel_bands: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_bands: 100,
            sample_count: 500,
            noise_scale: 0.075,
            noise_range: 125.0,
            band_decorrelation: 0.01,
            noise_seed: 0,
            thickness: 150.0,
            wave_amp: 25.0,
            wave_freq_angle: 6.0,
            wave_freq_time: 3.0,
            speed: 0.01,
            noise_time_scale: 0.25,
            noise_time_scale_pressed: 0.5,
            rotation_speed: 0.0,
            color_hue: 212.0,
            color_hue_pressed: 50.0,
            hue_smoothing: 0.05,
            hue_swing: 10.0,
            saturation: 100.0,
            brightness: 90.0,
            alpha_min: 0.6,
            alpha_max: 0.8,
            stroke_weight: 1.5,
            background: Hsba::white(),
            pointer_influence: 50.0,
            pointer_radius: 200.0,
            pointer_falloff: 1.5,
            progress_size_scale: 0.85,
            reference_size: 800.0,
            parallel_bands: false,
        }
    }
}

impl Config {
    /// Parse a JSON config. Unknown fields are rejected.
    pub fn from_json_str(s: &str) -> EtherResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| EtherError::validation(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> EtherResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check every parameter is usable.
    pub fn validate(&self) -> EtherResult<()> {
        let finite = [
            ("noise_scale", self.noise_scale),
            ("noise_range", self.noise_range),
            ("band_decorrelation", self.band_decorrelation),
            ("thickness", self.thickness),
            ("wave_amp", self.wave_amp),
            ("wave_freq_angle", self.wave_freq_angle),
            ("wave_freq_time", self.wave_freq_time),
            ("speed", self.speed),
            ("noise_time_scale", self.noise_time_scale),
            ("noise_time_scale_pressed", self.noise_time_scale_pressed),
            ("rotation_speed", self.rotation_speed),
            ("color_hue", self.color_hue),
            ("color_hue_pressed", self.color_hue_pressed),
            ("hue_smoothing", self.hue_smoothing),
            ("hue_swing", self.hue_swing),
            ("saturation", self.saturation),
            ("brightness", self.brightness),
            ("alpha_min", self.alpha_min),
            ("alpha_max", self.alpha_max),
            ("stroke_weight", self.stroke_weight),
            ("background.h", self.background.h),
            ("background.s", self.background.s),
            ("background.b", self.background.b),
            ("background.a", self.background.a),
            ("pointer_influence", self.pointer_influence),
            ("pointer_radius", self.pointer_radius),
            ("pointer_falloff", self.pointer_falloff),
            ("progress_size_scale", self.progress_size_scale),
            ("reference_size", self.reference_size),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(EtherError::validation(format!("{name} must be finite")));
            }
        }

        if self.sample_count == 0 {
            return Err(EtherError::validation("sample_count must be > 0"));
        }
        if self.speed < 0.0 {
            return Err(EtherError::validation(
                "speed must be >= 0 (accumulators only move forward)",
            ));
        }
        if self.noise_time_scale < 0.0 || self.noise_time_scale_pressed < 0.0 {
            return Err(EtherError::validation("noise time scales must be >= 0"));
        }
        if self.wave_freq_time < 0.0 {
            return Err(EtherError::validation("wave_freq_time must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.hue_smoothing) {
            return Err(EtherError::validation("hue_smoothing must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.alpha_min) || !(0.0..=1.0).contains(&self.alpha_max) {
            return Err(EtherError::validation("alpha bounds must be in [0, 1]"));
        }
        if self.alpha_min > self.alpha_max {
            return Err(EtherError::validation("alpha_min must be <= alpha_max"));
        }
        if self.pointer_radius < 0.0 {
            return Err(EtherError::validation("pointer_radius must be >= 0"));
        }
        if self.reference_size <= 0.0 {
            return Err(EtherError::validation("reference_size must be > 0"));
        }
        if self.stroke_weight < 0.0 {
            return Err(EtherError::validation("stroke_weight must be >= 0"));
        }
        Ok(())
    }
}
