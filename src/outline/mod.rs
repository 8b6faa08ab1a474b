//! Outline acquisition: turn a vector path into a centered, evenly sampled ring of points.

mod sampler;
mod svg;

use std::path::Path;

use crate::foundation::core::Point;

pub use sampler::{DEFAULT_SAMPLE_COUNT, OutlineSampler};

/// Cyclic, centroid-centered sequence of outline samples.
///
/// Index `k` and `k % len()` address the same sample. The ring is immutable once built; an empty
/// ring means "nothing to draw".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutlineRing {
    points: Vec<Point>,
}

impl OutlineRing {
    /// The empty ring.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a ring from raw samples, re-centering them on their centroid.
    ///
    /// Non-finite input yields the empty ring.
    pub fn from_points_centered(raw: Vec<Point>) -> Self {
        if raw.is_empty() || raw.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Self::empty();
        }

        let n = raw.len() as f64;
        let (sx, sy) = raw.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        let (cx, cy) = (sx / n, sy / n);

        Self {
            points: raw
                .into_iter()
                .map(|p| Point::new(p.x - cx, p.y - cy))
                .collect(),
        }
    }

    /// Build a ring from samples used verbatim (no re-centering).
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Load the first path of an SVG file, or return the empty ring on any failure.
    ///
    /// This is the degraded-mode entry point: the failure is logged and the animation keeps
    /// running with nothing to draw.
    pub fn load_or_empty(path: &Path, sample_count: usize) -> Self {
        match OutlineSampler::new(sample_count).load_svg_file(path) {
            Ok(ring) => ring,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "outline unavailable; drawing nothing");
                Self::empty()
            }
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sample at cyclic index `k`. Returns `None` only for the empty ring.
    pub fn get(&self, k: usize) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points[k % self.points.len()])
    }

    /// Borrow the samples in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Centroid of the samples (the origin for rings built by the sampler).
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }
}
