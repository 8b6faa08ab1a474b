//! Frame sinks and the interactive recorder.
//!
//! Sinks consume rendered frames in capture order. [`FrameRecorder`](recorder::FrameRecorder)
//! gates a sink behind the live recording toggle.

pub(crate) mod ffmpeg;
pub(crate) mod png_seq;
pub(crate) mod recorder;
pub(crate) mod sink;
