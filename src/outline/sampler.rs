use std::path::Path;

use anyhow::Context as _;
use kurbo::{ParamCurve as _, ParamCurveArclen as _, PathSeg};

use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{EtherError, EtherResult};
use crate::outline::OutlineRing;

/// Default number of samples per outline.
pub const DEFAULT_SAMPLE_COUNT: usize = 500;

const ARCLEN_ACCURACY: f64 = 1e-6;

/// Resamples a closed vector path into an [`OutlineRing`] evenly spaced by arc length.
#[derive(Clone, Copy, Debug)]
pub struct OutlineSampler {
    sample_count: usize,
}

impl Default for OutlineSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_COUNT)
    }
}

impl OutlineSampler {
    /// Sampler producing `sample_count` points per ring.
    pub fn new(sample_count: usize) -> Self {
        Self { sample_count }
    }

    /// Number of samples per ring.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Sample `path` at `L * i / S` for `i` in `0..S`, then re-center on the centroid.
    pub fn sample_path(&self, path: &BezPath) -> EtherResult<OutlineRing> {
        if self.sample_count == 0 {
            return Err(EtherError::outline("sample count must be > 0"));
        }

        let segs: Vec<(PathSeg, f64)> = path
            .segments()
            .map(|seg| (seg, seg.arclen(ARCLEN_ACCURACY)))
            .filter(|(_, len)| *len > 0.0)
            .collect();
        let total: f64 = segs.iter().map(|(_, len)| len).sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(EtherError::outline(format!(
                "outline has unusable length {total}"
            )));
        }

        let mut raw = Vec::with_capacity(self.sample_count);
        let mut seg_idx = 0usize;
        let mut seg_start = 0.0f64;
        for i in 0..self.sample_count {
            let target = total * (i as f64) / (self.sample_count as f64);
            while seg_idx + 1 < segs.len() && seg_start + segs[seg_idx].1 <= target {
                seg_start += segs[seg_idx].1;
                seg_idx += 1;
            }
            let (seg, len) = segs[seg_idx];
            let local = (target - seg_start).clamp(0.0, len);
            let t = seg.inv_arclen(local, ARCLEN_ACCURACY);
            raw.push(seg.eval(t));
        }

        let ring = OutlineRing::from_points_centered(raw);
        if ring.is_empty() {
            return Err(EtherError::outline("outline produced non-finite samples"));
        }
        Ok(ring)
    }

    /// Sample an SVG path `d` attribute.
    pub fn sample_path_data(&self, d: &str) -> EtherResult<OutlineRing> {
        let path = BezPath::from_svg(d)
            .map_err(|e| EtherError::outline(format!("invalid path data: {e}")))?;
        self.sample_path(&path)
    }

    /// Sample the first path of an SVG document.
    pub fn sample_svg(&self, svg_bytes: &[u8]) -> EtherResult<OutlineRing> {
        let path = super::svg::first_path(svg_bytes)?;
        self.sample_path(&path)
    }

    /// Read an SVG file and sample its first path.
    #[tracing::instrument(skip_all, fields(path = %path.display(), samples = self.sample_count))]
    pub fn load_svg_file(&self, path: &Path) -> EtherResult<OutlineRing> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read outline '{}'", path.display()))?;
        let ring = self.sample_svg(&bytes)?;
        tracing::debug!(samples = ring.len(), "outline sampled");
        Ok(ring)
    }

    /// Sample a polygon given by its vertices (closed implicitly).
    pub fn sample_polygon(&self, vertices: &[Point]) -> EtherResult<OutlineRing> {
        let Some((first, rest)) = vertices.split_first() else {
            return Err(EtherError::outline("polygon has no vertices"));
        };
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
        self.sample_path(&path)
    }
}
