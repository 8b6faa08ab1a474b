use crate::animation::contour::Band;
use crate::foundation::core::{Affine, Canvas, Point};
use crate::foundation::error::{EtherError, EtherResult};
use crate::render::color::Hsba;
use crate::render::viewport::FrameTransform;

/// A rendered frame as RGBA8 bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Immediate-mode drawing surface.
///
/// Calls arrive in frame order: `begin_frame`, any number of state/stroke calls, then
/// `finish_frame`. Transform, stroke color and stroke width persist until changed within a frame.
pub trait RenderSurface {
    /// Start a frame of `canvas` size, cleared to `background`.
    fn begin_frame(&mut self, canvas: Canvas, background: Hsba) -> EtherResult<()>;
    /// Local-to-surface transform for subsequent strokes.
    fn set_transform(&mut self, transform: Affine);
    /// Stroke color for subsequent strokes.
    fn set_stroke(&mut self, color: Hsba);
    /// Stroke width in local units.
    fn set_stroke_width(&mut self, width: f64);
    /// Stroke a polyline through `points` (no fill). Closed if its last point equals its first.
    fn stroke_polyline(&mut self, points: &[Point]) -> EtherResult<()>;
    /// Finish the frame and read back its pixels.
    fn finish_frame(&mut self) -> EtherResult<FrameRGBA>;
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub canvas: Canvas,
    pub transform: FrameTransform,
    pub background: Hsba,
    pub stroke_width: f64,
    /// Drawn in order, so band 0 ends up at the back.
    pub bands: Vec<Band>,
}

/// Draw `plan` onto `surface` and return the finished frame.
///
/// Bands with fewer than two points are skipped.
#[tracing::instrument(level = "trace", skip_all, fields(bands = plan.bands.len()))]
pub fn draw_plan(surface: &mut dyn RenderSurface, plan: &FramePlan) -> EtherResult<FrameRGBA> {
    if plan.canvas.is_empty() {
        return Err(EtherError::render(format!(
            "cannot draw onto an empty {}x{} canvas",
            plan.canvas.width, plan.canvas.height
        )));
    }

    surface.begin_frame(plan.canvas, plan.background)?;
    surface.set_transform(plan.transform.to_affine());
    surface.set_stroke_width(plan.stroke_width);
    for band in &plan.bands {
        if band.points.len() < 2 {
            continue;
        }
        surface.set_stroke(band.color);
        surface.stroke_polyline(&band.points)?;
    }
    surface.finish_frame()
}
