//! Per-band contour generation.
//!
//! Each band is the base outline pushed along its radial direction by
//!
//! ```text
//! offset = band_offset + lerp(-0.5 * noise_range, noise_range, n) * progress
//!                      + sin(angle * wave_freq_angle + wave_phase) * wave_amp * progress
//! ```
//!
//! followed by pointer attraction in screen space. `angle` is a uniform re-parameterization by
//! sample index (`2π k / S`), not the geometric angle of the sample, so noise and wave texture are
//! spread evenly over the ring indices whatever the outline's shape.

use std::f64::consts::TAU;

use rayon::prelude::*;

use crate::animation::clock::AnimationState;
use crate::config::Config;
use crate::field::noise::NoiseField;
use crate::field::pointer::{PointerField, PointerSample};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{lerp, map_range};
use crate::outline::OutlineRing;
use crate::render::color::Hsba;

/// One generated band: a closed polyline plus its stroke color.
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    /// Band index, `0..num_bands`. Lower indices are drawn first.
    pub index: u32,
    /// `S + 1` vertices, the last repeating the first. Empty when the ring is empty.
    pub points: Vec<Point>,
    /// Stroke color.
    pub color: Hsba,
}

/// Geometry parameters of the displacement model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContourParams {
    /// Number of bands.
    pub num_bands: u32,
    /// Ribbon width.
    pub thickness: f64,
    /// Noise circle diameter.
    pub noise_scale: f64,
    /// Radial noise displacement range.
    pub noise_range: f64,
    /// Per-band noise coordinate offset.
    pub band_decorrelation: f64,
    /// Wave amplitude.
    pub wave_amp: f64,
    /// Wave frequency along the ring.
    pub wave_freq_angle: f64,
}

impl ContourParams {
    /// Parameters taken from `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            num_bands: cfg.num_bands,
            thickness: cfg.thickness,
            noise_scale: cfg.noise_scale,
            noise_range: cfg.noise_range,
            band_decorrelation: cfg.band_decorrelation,
            wave_amp: cfg.wave_amp,
            wave_freq_angle: cfg.wave_freq_angle,
        }
    }

    /// Fixed radial offset of `band` inside the ribbon.
    ///
    /// Bands are spread evenly from `-thickness / 2` to `thickness / 2`; a lone band sits on the
    /// outline itself.
    pub fn band_offset(&self, band: u32) -> f64 {
        let half = self.thickness * 0.5;
        let t = if self.num_bands <= 1 {
            0.5
        } else {
            f64::from(band) / f64::from(self.num_bands - 1)
        };
        lerp(-half, half, t)
    }
}

/// Per-band stroke styling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandStyle {
    hue_swing: f64,
    saturation: f64,
    brightness: f64,
    alpha_min: f64,
    alpha_max: f64,
}

/// Hue step between consecutive bands, in radians of the modulation sine.
const HUE_BAND_STEP: f64 = 0.1;

impl BandStyle {
    /// Styling taken from `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            hue_swing: cfg.hue_swing,
            saturation: cfg.saturation,
            brightness: cfg.brightness,
            alpha_min: cfg.alpha_min,
            alpha_max: cfg.alpha_max,
        }
    }

    /// Color of `band` for the given state.
    pub fn color(&self, band: u32, state: &AnimationState) -> Hsba {
        let i = f64::from(band);
        let h = state.color_hue + (state.elapsed + i * HUE_BAND_STEP).sin() * self.hue_swing;
        let a = map_range(
            (state.elapsed + i).sin(),
            -1.0,
            1.0,
            self.alpha_min,
            self.alpha_max,
        );
        Hsba::new(h, self.saturation, self.brightness, a)
    }
}

/// Generates band polylines from an outline ring.
pub struct ContourGenerator<N> {
    params: ContourParams,
    style: BandStyle,
    pointer_field: PointerField,
    noise: N,
    parallel: bool,
}

impl<N: NoiseField> ContourGenerator<N> {
    /// Generator configured from `cfg`, sampling `noise`.
    pub fn new(cfg: &Config, noise: N) -> Self {
        Self {
            params: ContourParams::from_config(cfg),
            style: BandStyle::from_config(cfg),
            pointer_field: PointerField::new(
                cfg.pointer_influence,
                cfg.pointer_radius,
                cfg.pointer_falloff,
            ),
            noise,
            parallel: cfg.parallel_bands,
        }
    }

    /// Generate bands on the rayon pool (output order is unchanged).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Geometry parameters.
    pub fn params(&self) -> &ContourParams {
        &self.params
    }

    /// Pointer field used for attraction.
    pub fn pointer_field(&self) -> &PointerField {
        &self.pointer_field
    }

    /// Noise oracle.
    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Closed polyline of `band`: `ring.len() + 1` points, the last equal to the first.
    ///
    /// Returns an empty polyline for an empty ring.
    pub fn generate_band(
        &self,
        band: u32,
        ring: &OutlineRing,
        state: &AnimationState,
        pointer: Option<&PointerSample>,
    ) -> Vec<Point> {
        let samples = ring.points();
        let count = samples.len();
        if count == 0 {
            return Vec::new();
        }

        let p = &self.params;
        let progress = state.progress();
        let band_offset = p.band_offset(band);
        let index_offset = f64::from(band) * p.band_decorrelation;

        let mut out = Vec::with_capacity(count + 1);
        for (k, &base) in samples.iter().enumerate() {
            let angle = TAU * (k as f64) / (count as f64);

            let xoff = map_range(angle.cos(), -1.0, 1.0, 0.0, p.noise_scale);
            let yoff = map_range(angle.sin(), -1.0, 1.0, 0.0, p.noise_scale);
            let n = self
                .noise
                .sample(xoff + index_offset, yoff + index_offset, state.noise_time);

            let dir = radial_direction(base);
            let noise_disp = lerp(-p.noise_range * 0.5, p.noise_range, n) * progress;
            let wave_disp =
                (angle * p.wave_freq_angle + state.wave_phase).sin() * p.wave_amp * progress;
            let offset_len = band_offset + noise_disp + wave_disp;

            let mut v = base + dir * offset_len;
            if let Some(sample) = pointer {
                v = sample.apply(&self.pointer_field, v);
            }
            out.push(v);
        }
        // Sample S sits at angle 2π and ring index 0: identical to sample 0.
        out.push(out[0]);
        out
    }

    /// All bands for one frame, ordered by band index.
    pub fn generate_frame(
        &self,
        ring: &OutlineRing,
        state: &AnimationState,
        pointer: Option<&PointerSample>,
    ) -> Vec<Band> {
        let make = |index: u32| Band {
            index,
            points: self.generate_band(index, ring, state, pointer),
            color: self.style.color(index, state),
        };

        if self.parallel {
            (0..self.params.num_bands).into_par_iter().map(make).collect()
        } else {
            (0..self.params.num_bands).map(make).collect()
        }
    }
}

fn radial_direction(base: Point) -> Vec2 {
    let v = base.to_vec2();
    let len = v.hypot();
    if len == 0.0 || !len.is_finite() {
        return Vec2::ZERO;
    }
    v / len
}
