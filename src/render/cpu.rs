use crate::foundation::core::{Affine, Canvas, Point};
use crate::foundation::error::{EtherError, EtherResult};
use crate::foundation::math::flatten_to_opaque_rgba8;
use crate::render::backend::{FrameRGBA, RenderSurface};
use crate::render::color::Hsba;

/// [`RenderSurface`] rasterizing on the CPU with `vello_cpu`.
///
/// The pixmap is reused across frames and reallocated only when the canvas size changes. Frames
/// begun on an opaque background come back fully opaque.
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
    stroke_width: f64,
    opaque_bg: Option<[u8; 4]>,
}

impl CpuSurface {
    /// Surface with an initial size of `canvas`.
    pub fn new(canvas: Canvas) -> EtherResult<Self> {
        let (width, height) = canvas_to_u16(canvas)?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            ctx: None,
            stroke_width: 1.0,
            opaque_bg: None,
        })
    }

    /// Current pixel size.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(u32::from(self.width), u32::from(self.height))
    }

    fn ensure_size(&mut self, canvas: Canvas) -> EtherResult<()> {
        let (width, height) = canvas_to_u16(canvas)?;
        if width != self.width || height != self.height {
            tracing::debug!(width, height, "resizing cpu surface");
            self.width = width;
            self.height = height;
            self.pixmap = vello_cpu::Pixmap::new(width, height);
        }
        Ok(())
    }

    fn ctx_mut(&mut self) -> EtherResult<&mut vello_cpu::RenderContext> {
        self.ctx
            .as_mut()
            .ok_or_else(|| EtherError::render("no frame in progress (call begin_frame first)"))
    }
}

impl RenderSurface for CpuSurface {
    fn begin_frame(&mut self, canvas: Canvas, background: Hsba) -> EtherResult<()> {
        self.ensure_size(canvas)?;
        let bg = background.to_rgba8_premul();
        self.opaque_bg = (bg[3] == 255).then_some(bg);

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint_for(background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        self.stroke_width = 1.0;
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(self.stroke_width));
        self.ctx = Some(ctx);
        Ok(())
    }

    fn set_transform(&mut self, transform: Affine) {
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.set_transform(affine_to_cpu(transform));
        }
    }

    fn set_stroke(&mut self, color: Hsba) {
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.set_paint(paint_for(color));
        }
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let stroke = vello_cpu::kurbo::Stroke::new(self.stroke_width);
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.set_stroke(stroke);
        }
    }

    fn stroke_polyline(&mut self, points: &[Point]) -> EtherResult<()> {
        if self.stroke_width == 0.0 {
            return Ok(());
        }
        let Some(path) = polyline_to_cpu(points) else {
            tracing::trace!(len = points.len(), "skipping degenerate polyline");
            return Ok(());
        };
        self.ctx_mut()?.stroke_path(&path);
        Ok(())
    }

    fn finish_frame(&mut self) -> EtherResult<FrameRGBA> {
        let mut ctx = self
            .ctx
            .take()
            .ok_or_else(|| EtherError::render("finish_frame without begin_frame"))?;
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        let src = self.pixmap.data_as_u8_slice();
        let data = match self.opaque_bg.take() {
            // Anti-aliased coverage can leave alpha a step short of 255 over an opaque fill.
            Some(bg) => {
                let mut out = vec![0u8; src.len()];
                flatten_to_opaque_rgba8(&mut out, src, true, bg)?;
                out
            }
            None => src.to_vec(),
        };

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        })
    }
}

fn canvas_to_u16(canvas: Canvas) -> EtherResult<(u16, u16)> {
    if canvas.is_empty() {
        return Err(EtherError::render("surface width/height must be non-zero"));
    }
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| EtherError::render("surface width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| EtherError::render("surface height exceeds u16"))?;
    Ok((width, height))
}

fn paint_for(color: Hsba) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = color.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

/// `None` for fewer than two points or any non-finite coordinate.
fn polyline_to_cpu(points: &[Point]) -> Option<vello_cpu::kurbo::BezPath> {
    let (&first, rest) = points.split_first()?;
    if rest.is_empty() || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return None;
    }

    let closed = points.len() > 2 && points.last() == Some(&first);
    let body = if closed { &rest[..rest.len() - 1] } else { rest };

    let mut out = vello_cpu::kurbo::BezPath::new();
    out.move_to(point_to_cpu(first));
    for &p in body {
        out.line_to(point_to_cpu(p));
    }
    if closed {
        out.close_path();
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_fills_every_pixel() {
        let canvas = Canvas::new(8, 6);
        let mut s = CpuSurface::new(canvas).unwrap();
        s.begin_frame(canvas, Hsba::white()).unwrap();
        let frame = s.finish_frame().unwrap();
        assert_eq!((frame.width, frame.height), (8, 6));
        assert_eq!(frame.data.len(), 8 * 6 * 4);
        assert!(frame.data.iter().all(|&b| b == 255));
    }

    #[test]
    fn stroke_paints_under_the_line_only() {
        let canvas = Canvas::new(16, 16);
        let mut s = CpuSurface::new(canvas).unwrap();
        s.begin_frame(canvas, Hsba::white()).unwrap();
        s.set_transform(Affine::IDENTITY);
        s.set_stroke(Hsba::new(0.0, 100.0, 100.0, 1.0));
        s.set_stroke_width(4.0);
        s.stroke_polyline(&[Point::new(2.0, 8.0), Point::new(14.0, 8.0)])
            .unwrap();
        let frame = s.finish_frame().unwrap();

        let on = frame.pixel(8, 8).unwrap();
        assert!(on[0] > 200 && on[1] < 60 && on[2] < 60, "{on:?}");
        let off = frame.pixel(8, 1).unwrap();
        assert_eq!(off, [255, 255, 255, 255]);
    }

    #[test]
    fn opaque_background_keeps_antialiased_edges_opaque() {
        let canvas = Canvas::new(64, 64);
        let mut s = CpuSurface::new(canvas).unwrap();
        s.begin_frame(canvas, Hsba::white()).unwrap();
        s.set_transform(Affine::IDENTITY);
        s.set_stroke(Hsba::new(212.0, 100.0, 90.0, 0.7));
        s.set_stroke_width(0.6);
        for k in 0..8 {
            let y = 4.3 + 7.1 * f64::from(k);
            s.stroke_polyline(&[
                Point::new(1.7, y),
                Point::new(62.2, y + 3.4),
                Point::new(30.5, y + 0.9),
            ])
            .unwrap();
        }
        let frame = s.finish_frame().unwrap();
        assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
        assert!(frame.data.chunks_exact(4).any(|px| px[2] > px[0].saturating_add(20)));

        // translucent backgrounds are passed through untouched
        s.begin_frame(canvas, Hsba::new(0.0, 0.0, 100.0, 0.5)).unwrap();
        let clear = s.finish_frame().unwrap();
        assert!(clear.data.chunks_exact(4).all(|px| px[3] < 255));
    }

    #[test]
    fn resizes_between_frames() {
        let mut s = CpuSurface::new(Canvas::new(4, 4)).unwrap();
        s.begin_frame(Canvas::new(10, 2), Hsba::white()).unwrap();
        let frame = s.finish_frame().unwrap();
        assert_eq!((frame.width, frame.height), (10, 2));
        assert_eq!(s.canvas(), Canvas::new(10, 2));
    }

    #[test]
    fn oversized_or_empty_canvas_is_rejected() {
        assert!(CpuSurface::new(Canvas::new(70_000, 4)).is_err());
        assert!(CpuSurface::new(Canvas::new(0, 4)).is_err());
        let mut s = CpuSurface::new(Canvas::new(4, 4)).unwrap();
        let err = s
            .begin_frame(Canvas::new(4, 70_000), Hsba::white())
            .unwrap_err();
        assert!(err.to_string().contains("height exceeds u16"));
    }

    #[test]
    fn finishing_without_a_frame_fails() {
        let mut s = CpuSurface::new(Canvas::new(4, 4)).unwrap();
        assert!(s.finish_frame().is_err());
        assert!(
            s.stroke_polyline(&[Point::ZERO, Point::new(1.0, 1.0)])
                .is_err()
        );
    }

    #[test]
    fn polyline_conversion_closes_rings() {
        let ring = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        let path = polyline_to_cpu(&ring).unwrap();
        // move, 2 lines, close
        assert_eq!(path.elements().len(), 4);
        assert!(polyline_to_cpu(&ring[..1]).is_none());
        assert!(polyline_to_cpu(&[Point::ZERO, Point::new(f64::NAN, 0.0)]).is_none());
    }
}
