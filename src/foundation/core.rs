use crate::foundation::error::{EtherError, EtherResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Absolute 0-based frame index since the session started.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> EtherResult<Self> {
        if start.0 > end.0 {
            return Err(EtherError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> EtherResult<Self> {
        if den == 0 {
            return Err(EtherError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(EtherError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }
}

/// Output surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center of the canvas in pixel coordinates.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }

    /// Length of the shorter side, in pixels.
    pub fn min_side(self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    /// Return `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_range_validation_and_len() {
        assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
        let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
        assert_eq!(r.len_frames(), 3);
        assert!(r.contains(FrameIndex(4)));
        assert!(!r.contains(FrameIndex(5)));
        assert!(FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap().is_empty());
    }

    #[test]
    fn fps_rejects_zero_parts() {
        assert!(Fps::new(0, 1).is_err());
        assert!(Fps::new(30, 0).is_err());
        let fps = Fps::new(30, 1).unwrap();
        assert!((fps.frame_duration_secs() - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn canvas_geometry() {
        let c = Canvas::new(1280, 720);
        assert_eq!(c.center(), Point::new(640.0, 360.0));
        assert_eq!(c.min_side(), 720.0);
        assert!(!c.is_empty());
        assert!(Canvas::new(0, 10).is_empty());
    }
}
