//! Etherloop is a real-time procedural contour animation engine.
//!
//! A vector outline is resampled into a ring of points; every frame, a stack of bands is pushed
//! along the ring's radial directions by smooth noise and a travelling wave, pulled locally toward
//! the pointer, and stroked on a CPU canvas. The public API is session-oriented:
//!
//! - Sample an [`OutlineRing`] with an [`OutlineSampler`]
//! - Create an [`AnimationSession`] from a [`Config`]
//! - Drive it with [`run_loop`], or step it by hand and draw the [`FramePlan`] on a
//!   [`RenderSurface`]
//!
//! See [`guide`] for the architecture walkthrough.
#![forbid(unsafe_code)]

mod config;
mod foundation;

pub(crate) mod animation;
pub(crate) mod encode;
pub(crate) mod field;
/// Architecture walkthrough.
pub mod guide;
pub(crate) mod outline;
pub(crate) mod render;
pub(crate) mod session;
#[cfg(feature = "live")]
pub(crate) mod window;

pub use crate::config::Config;
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Vec2,
};
pub use crate::foundation::error::{EtherError, EtherResult};
pub use crate::foundation::math::{lerp, map_range};

pub use crate::animation::clock::{AnimationClock, AnimationState};
pub use crate::animation::contour::{Band, BandStyle, ContourGenerator, ContourParams};
pub use crate::encode::ffmpeg::{FfmpegSink, is_ffmpeg_on_path};
pub use crate::encode::png_seq::{PngSequenceSink, write_png};
pub use crate::encode::recorder::FrameRecorder;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::field::noise::{ConstantNoise, FbmNoise, NoiseField};
pub use crate::field::pointer::{MIN_POINTER_DISTANCE, PointerField, PointerSample};
pub use crate::outline::{DEFAULT_SAMPLE_COUNT, OutlineRing, OutlineSampler};
pub use crate::render::backend::{FramePlan, FrameRGBA, RenderSurface, draw_plan};
pub use crate::render::color::Hsba;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::viewport::{FrameTransform, Viewport};
pub use crate::session::animation_session::{AnimationSession, FrameInput};
pub use crate::session::host::{FrameHost, RunStats, ScriptedHost, run_loop};
pub use crate::session::scheduler::{FixedFrames, Paced, Scheduler, Unbounded};
#[cfg(feature = "live")]
pub use crate::window::WindowHost;
