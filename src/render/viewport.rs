use crate::field::pointer::PointerSample;
use crate::foundation::core::{Affine, Canvas, Point};

/// Maps the outline's local space onto the output surface.
///
/// Local geometry is centered on the surface, rotated, then scaled by the responsive scale
/// (`min(width, height) / reference_size`) and the progress compensation factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    canvas: Canvas,
    reference_size: f64,
}

impl Viewport {
    /// Viewport for `canvas`.
    pub fn new(canvas: Canvas, reference_size: f64) -> Self {
        Self {
            canvas,
            reference_size,
        }
    }

    /// Current surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Apply a surface resize; takes effect on the next frame.
    pub fn resize(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    /// `min(width, height) / reference_size`.
    pub fn responsive_scale(&self) -> f64 {
        if self.reference_size <= 0.0 {
            return 0.0;
        }
        self.canvas.min_side() / self.reference_size
    }

    /// Transform for one frame.
    ///
    /// `progress_scale` is `1 - progress * (1 - progress_size_scale)`.
    pub fn frame_transform(&self, rotation: f64, progress_scale: f64) -> FrameTransform {
        FrameTransform {
            center: self.canvas.center(),
            rotation,
            scale: self.responsive_scale() * progress_scale,
        }
    }
}

/// Placement of local geometry on the surface for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTransform {
    /// Surface center in pixels.
    pub center: Point,
    /// Rotation in radians.
    pub rotation: f64,
    /// Local-unit to pixel scale.
    pub scale: f64,
}

impl FrameTransform {
    /// Local-to-surface affine: translate to center, rotate, scale.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.center.to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::scale(self.scale)
    }

    /// Express a raw surface-space pointer in the rotated, pixel-scaled frame used for attraction.
    pub fn pointer_sample(&self, raw: Point) -> PointerSample {
        let rel = raw - self.center;
        let (s, c) = (-self.rotation).sin_cos();
        let position = Point::new(rel.x * c - rel.y * s, rel.x * s + rel.y * c);
        PointerSample {
            position,
            scale_to_screen: self.scale,
        }
    }

    /// Surface position of a local point.
    pub fn to_surface(&self, local: Point) -> Point {
        self.to_affine() * local
    }

    /// Local position of a surface point. Returns `None` while the scale is degenerate.
    pub fn to_local(&self, surface: Point) -> Option<Point> {
        if self.scale == 0.0 || !self.scale.is_finite() {
            return None;
        }
        Some(self.to_affine().inverse() * surface)
    }
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self {
            center: Point::ZERO,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}
