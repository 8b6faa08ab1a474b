use crate::foundation::core::{Point, Vec2};

/// Distances below this are treated as this value.
pub const MIN_POINTER_DISTANCE: f64 = 1e-3;

/// Localized attraction towards the pointer.
///
/// The pull falls off as `(1 - d / radius)^falloff` and vanishes outside the influence disc:
/// `falloff = 1` gives a cone, `> 1` a spike, `< 1` a plateau.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerField {
    /// Pull strength.
    pub influence: f64,
    /// Radius of the influence disc.
    pub radius: f64,
    /// Falloff exponent.
    pub falloff: f64,
}

impl PointerField {
    /// Build a field.
    pub fn new(influence: f64, radius: f64, falloff: f64) -> Self {
        Self {
            influence,
            radius,
            falloff,
        }
    }

    /// Displacement applied to `point` by a pointer at `pointer`.
    ///
    /// Exactly zero when `|point - pointer| >= radius`. Never fails: a point on the pointer gets a
    /// zero-length pull.
    pub fn attract(&self, point: Point, pointer: Point) -> Vec2 {
        let delta = pointer - point;
        let d = delta.hypot().max(MIN_POINTER_DISTANCE);
        if self.radius.is_nan() || d >= self.radius {
            return Vec2::ZERO;
        }

        let normalized = d / self.radius;
        let strength = (1.0 - normalized).powf(self.falloff);
        let pull = (self.influence / self.radius) * strength;
        let out = delta * pull;
        if !out.x.is_finite() || !out.y.is_finite() {
            return Vec2::ZERO;
        }
        out
    }
}

/// Pointer position expressed in the frame's rotated, pixel-scaled space.
///
/// Geometry is multiplied by `scale_to_screen` before attraction so the influence radius is
/// measured in screen pixels, and the resulting pull is divided by it afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Pointer position relative to the surface center, counter-rotated by the frame rotation.
    pub position: Point,
    /// Local-unit to screen-pixel scale of the frame.
    pub scale_to_screen: f64,
}

impl PointerSample {
    /// Apply `field` to a vertex given in outline units, returning the displaced vertex.
    pub fn apply(&self, field: &PointerField, vertex: Point) -> Point {
        let s = self.scale_to_screen;
        if !s.is_finite() || s <= 0.0 {
            return vertex;
        }
        let on_screen = Point::new(vertex.x * s, vertex.y * s);
        let pull = field.attract(on_screen, self.position);
        vertex + pull / s
    }
}
