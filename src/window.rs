//! Live window host (feature `live`).

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::foundation::core::{Canvas, FrameIndex, Point};
use crate::foundation::error::{EtherError, EtherResult};
use crate::render::backend::FrameRGBA;
use crate::session::animation_session::FrameInput;
use crate::session::host::FrameHost;

/// [`FrameHost`] backed by a resizable `minifb` window.
///
/// Left button holds the pressed mode, `S` toggles recording, `Esc` or closing the window quits.
pub struct WindowHost {
    window: Window,
    size: Canvas,
    buffer: Vec<u32>,
}

impl WindowHost {
    pub fn new(title: &str, canvas: Canvas) -> EtherResult<Self> {
        let opts = WindowOptions {
            resize: true,
            ..WindowOptions::default()
        };
        let window = Window::new(title, canvas.width as usize, canvas.height as usize, opts)
            .map_err(|e| EtherError::render(format!("failed to open window: {e}")))?;
        Ok(Self {
            window,
            size: canvas,
            buffer: Vec::new(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    fn current_size(&self) -> Canvas {
        let (w, h) = self.window.get_size();
        Canvas::new(
            u32::try_from(w).unwrap_or(u32::MAX),
            u32::try_from(h).unwrap_or(u32::MAX),
        )
    }
}

impl FrameHost for WindowHost {
    fn poll_input(&mut self, _idx: FrameIndex) -> EtherResult<FrameInput> {
        let size = self.current_size();
        let resize = if size != self.size && !size.is_empty() {
            self.size = size;
            Some(size)
        } else {
            None
        };

        Ok(FrameInput {
            pointer: self
                .window
                .get_mouse_pos(MouseMode::Discard)
                .map(|(x, y)| Point::new(f64::from(x), f64::from(y))),
            pressed: self.window.get_mouse_down(MouseButton::Left),
            resize,
            toggle_recording: self.window.is_key_pressed(Key::S, KeyRepeat::No),
            quit: !self.window.is_open() || self.window.is_key_down(Key::Escape),
        })
    }

    fn present(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> EtherResult<()> {
        rgba_to_0rgb(&frame.data, &mut self.buffer);
        self.window
            .update_with_buffer(&self.buffer, frame.width as usize, frame.height as usize)
            .map_err(|e| EtherError::render(format!("failed to update window: {e}")))
    }
}

/// Pack RGBA8 bytes into minifb's `0RGB` words, dropping alpha.
fn rgba_to_0rgb(src: &[u8], dst: &mut Vec<u32>) {
    dst.clear();
    dst.extend(src.chunks_exact(4).map(|px| {
        (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2])
    }));
}
