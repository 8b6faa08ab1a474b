use crate::config::Config;
use crate::foundation::math::lerp;

/// Accumulators driving the animation.
///
/// `elapsed`, `wave_phase` and `noise_time` only grow; `color_hue` exponentially tracks a target.
/// Interaction changes only ever alter the per-frame increments, never the stored values, so the
/// shape stays continuous across press/release.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// Total time since start; drives progress and per-band hue/alpha modulation.
    pub elapsed: f64,
    /// Phase of the wave term.
    pub wave_phase: f64,
    /// Third noise coordinate.
    pub noise_time: f64,
    /// Smoothed base hue.
    pub color_hue: f64,
    /// Number of completed `advance` calls; drives the global rotation.
    pub frame: u64,
}

impl AnimationState {
    /// State before the first frame, with the hue resting on `hue`.
    pub fn initial(hue: f64) -> Self {
        Self {
            elapsed: 0.0,
            wave_phase: 0.0,
            noise_time: 0.0,
            color_hue: hue,
            frame: 0,
        }
    }

    /// Displacement ramp, `elapsed` clamped to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.elapsed.clamp(0.0, 1.0)
    }
}

/// Pure frame-advance rule for [`AnimationState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    speed: f64,
    wave_freq_time: f64,
    noise_time_scale: f64,
    noise_time_scale_pressed: f64,
    hue_released: f64,
    hue_pressed: f64,
    hue_smoothing: f64,
}

impl AnimationClock {
    /// Clock parameters taken from `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            speed: cfg.speed,
            wave_freq_time: cfg.wave_freq_time,
            noise_time_scale: cfg.noise_time_scale,
            noise_time_scale_pressed: cfg.noise_time_scale_pressed,
            hue_released: cfg.color_hue,
            hue_pressed: cfg.color_hue_pressed,
            hue_smoothing: cfg.hue_smoothing,
        }
    }

    /// Initial state for this clock.
    pub fn initial_state(&self) -> AnimationState {
        AnimationState::initial(self.hue_released)
    }

    /// Wave phase added per frame. The wave freezes while pressed.
    pub fn wave_rate(&self, pressed: bool) -> f64 {
        let freq = if pressed { 0.0 } else { self.wave_freq_time };
        freq * self.speed
    }

    /// Noise time added per frame.
    pub fn noise_rate(&self, pressed: bool) -> f64 {
        let scale = if pressed {
            self.noise_time_scale_pressed
        } else {
            self.noise_time_scale
        };
        scale * self.speed
    }

    /// Hue the smoothing filter is heading for.
    pub fn target_hue(&self, pressed: bool) -> f64 {
        if pressed {
            self.hue_pressed
        } else {
            self.hue_released
        }
    }

    /// Advance one frame.
    pub fn advance(&self, state: AnimationState, pressed: bool) -> AnimationState {
        AnimationState {
            elapsed: state.elapsed + self.speed,
            wave_phase: state.wave_phase + self.wave_rate(pressed),
            noise_time: state.noise_time + self.noise_rate(pressed),
            color_hue: lerp(state.color_hue, self.target_hue(pressed), self.hue_smoothing),
            frame: state.frame.saturating_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> AnimationClock {
        AnimationClock::from_config(&Config::default())
    }

    #[test]
    fn released_rates_match_config() {
        let c = clock();
        let s = c.advance(c.initial_state(), false);
        assert_eq!(s.elapsed, 0.01);
        assert!((s.wave_phase - 0.03).abs() < 1e-15);
        assert!((s.noise_time - 0.0025).abs() < 1e-15);
        assert_eq!(s.color_hue, 212.0);
        assert_eq!(s.frame, 1);
    }

    #[test]
    fn pressing_freezes_wave_and_speeds_noise() {
        let c = clock();
        let s0 = c.advance(c.initial_state(), false);
        let s1 = c.advance(s0, true);
        assert_eq!(s1.wave_phase, s0.wave_phase);
        assert!((s1.noise_time - s0.noise_time - 0.005).abs() < 1e-15);
        assert!(s1.elapsed > s0.elapsed);
    }

    #[test]
    fn progress_saturates() {
        let c = clock();
        let mut s = c.initial_state();
        assert_eq!(s.progress(), 0.0);
        for _ in 0..1000 {
            s = c.advance(s, false);
            assert!(s.progress() <= 1.0);
        }
        assert_eq!(s.progress(), 1.0);
    }

    #[test]
    fn hue_tracks_target_without_overshoot() {
        let c = clock();
        let mut s = c.initial_state();
        let mut prev = s.color_hue;
        for _ in 0..300 {
            s = c.advance(s, true);
            assert!(s.color_hue <= prev);
            assert!(s.color_hue >= 50.0);
            prev = s.color_hue;
        }
        assert!((s.color_hue - 50.0).abs() < 0.01);

        // Releasing heads back up from wherever the hue currently is.
        let back = c.advance(s, false);
        assert!(back.color_hue > s.color_hue);
        assert!(back.color_hue - s.color_hue < 0.05 * (212.0 - 50.0) + 1e-9);
    }
}
