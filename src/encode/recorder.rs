use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{EtherError, EtherResult};
use crate::render::backend::FrameRGBA;

/// Captures rendered frames into a sink while recording is on.
///
/// `start` and `stop` are idempotent. Each start/stop pair is one recording: the sink sees one
/// `begin`, the frames captured in between, and one `end`. A recording is bound to the canvas size
/// it started with; a resized frame ends it.
pub struct FrameRecorder<S: FrameSink = Box<dyn FrameSink>> {
    sink: S,
    fps: Fps,
    active: Option<SinkConfig>,
    captured: u64,
    recordings: u32,
}

impl<S: FrameSink> FrameRecorder<S> {
    pub fn new(sink: S, fps: Fps) -> Self {
        Self {
            sink,
            fps,
            active: None,
            captured: 0,
            recordings: 0,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Frames captured by the current (or last) recording.
    pub fn captured(&self) -> u64 {
        self.captured
    }

    /// Completed recordings.
    pub fn recordings(&self) -> u32 {
        self.recordings
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Start recording frames of `canvas` size. No-op while already recording.
    pub fn start(&mut self, canvas: Canvas) -> EtherResult<()> {
        if self.active.is_some() {
            return Ok(());
        }
        if canvas.is_empty() {
            return Err(EtherError::encode("cannot record an empty canvas"));
        }
        let cfg = SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
        };
        self.sink.begin(cfg)?;
        self.active = Some(cfg);
        self.captured = 0;
        tracing::info!(width = canvas.width, height = canvas.height, "recording started");
        Ok(())
    }

    /// Stop recording and let the sink finalize its output. No-op while not recording.
    pub fn stop(&mut self) -> EtherResult<()> {
        if self.active.take().is_none() {
            return Ok(());
        }
        self.recordings = self.recordings.saturating_add(1);
        tracing::info!(frames = self.captured, "recording stopped");
        self.sink.end()
    }

    /// Flip the recording state.
    pub fn toggle(&mut self, canvas: Canvas) -> EtherResult<()> {
        if self.is_recording() {
            self.stop()
        } else {
            self.start(canvas)
        }
    }

    /// Hand `frame` to the sink if recording. Returns whether the frame was captured.
    ///
    /// A failed capture ends the recording before the error is returned.
    pub fn capture(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> EtherResult<bool> {
        let Some(cfg) = self.active else {
            return Ok(false);
        };

        if frame.width != cfg.width || frame.height != cfg.height {
            tracing::warn!(
                width = frame.width,
                height = frame.height,
                "canvas resized while recording; ending recording"
            );
            self.stop()?;
            return Ok(false);
        }

        if let Err(err) = self.sink.push_frame(idx, frame) {
            tracing::warn!(error = %err, "frame capture failed; ending recording");
            if let Err(end_err) = self.stop() {
                tracing::warn!(error = %end_err, "failed to finalize recording");
            }
            return Err(err);
        }
        self.captured += 1;
        Ok(true)
    }
}
