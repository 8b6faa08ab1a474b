use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::EtherResult;
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order between one
/// `begin` and the matching `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> EtherResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> EtherResult<()>;
    fn end(&mut self) -> EtherResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in capture order.
    pub frames: Vec<(FrameIndex, FrameRGBA)>,
    /// Number of completed `begin`/`end` pairs.
    pub finished: u32,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> EtherResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> EtherResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> EtherResult<()> {
        self.finished = self.finished.saturating_add(1);
        Ok(())
    }
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn begin(&mut self, cfg: SinkConfig) -> EtherResult<()> {
        (**self).begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> EtherResult<()> {
        (**self).push_frame(idx, frame)
    }

    fn end(&mut self) -> EtherResult<()> {
        (**self).end()
    }
}
