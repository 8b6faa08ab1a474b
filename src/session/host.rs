use crate::encode::recorder::FrameRecorder;
use crate::encode::sink::FrameSink;
use crate::field::noise::NoiseField;
use crate::foundation::core::{Canvas, FrameIndex, FrameRange, Point};
use crate::foundation::error::EtherResult;
use crate::render::backend::{FrameRGBA, RenderSurface};
use crate::session::animation_session::{AnimationSession, FrameInput};
use crate::session::scheduler::Scheduler;

/// Source of per-frame input and destination of finished frames.
pub trait FrameHost {
    /// Input snapshot for frame `idx`.
    fn poll_input(&mut self, idx: FrameIndex) -> EtherResult<FrameInput>;
    /// Show (or otherwise consume) the finished frame.
    fn present(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> EtherResult<()>;
}

/// Offline host replaying a fixed input script.
#[derive(Clone, Debug, Default)]
pub struct ScriptedHost {
    pointer: Option<Point>,
    presses: Vec<FrameRange>,
    toggles: Vec<FrameIndex>,
    resizes: Vec<(FrameIndex, Canvas)>,
    presented: u64,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the pointer at `pointer` (surface pixels) for the whole run.
    pub fn with_pointer(mut self, pointer: Point) -> Self {
        self.pointer = Some(pointer);
        self
    }

    /// Hold the button during `range`.
    pub fn with_press(mut self, range: FrameRange) -> Self {
        self.presses.push(range);
        self
    }

    /// Toggle recording after frame `idx`.
    pub fn with_toggle(mut self, idx: FrameIndex) -> Self {
        self.toggles.push(idx);
        self
    }

    /// Resize the surface at frame `idx`.
    pub fn with_resize(mut self, idx: FrameIndex, canvas: Canvas) -> Self {
        self.resizes.push((idx, canvas));
        self
    }

    /// Frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Input for `idx` according to the script.
    pub fn input_at(&self, idx: FrameIndex) -> FrameInput {
        FrameInput {
            pointer: self.pointer,
            pressed: self.presses.iter().any(|r| r.contains(idx)),
            resize: self
                .resizes
                .iter()
                .rev()
                .find(|(at, _)| *at == idx)
                .map(|&(_, c)| c),
            toggle_recording: self.toggles.contains(&idx),
            quit: false,
        }
    }
}

impl FrameHost for ScriptedHost {
    fn poll_input(&mut self, idx: FrameIndex) -> EtherResult<FrameInput> {
        Ok(self.input_at(idx))
    }

    fn present(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> EtherResult<()> {
        self.presented += 1;
        Ok(())
    }
}

/// Counters returned by [`run_loop`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames generated and drawn.
    pub frames: u64,
    /// Frames handed to the recorder's sink.
    pub captured: u64,
}

/// Drive `session` until the scheduler runs out of frames or the host asks to quit.
///
/// Per frame: poll input, advance and draw, capture, present, then apply a recording toggle. An
/// open recording is finalized when the loop ends.
pub fn run_loop<N: NoiseField, S: FrameSink>(
    session: &mut AnimationSession<N>,
    scheduler: &mut dyn Scheduler,
    host: &mut dyn FrameHost,
    surface: &mut dyn RenderSurface,
    recorder: &mut FrameRecorder<S>,
) -> EtherResult<RunStats> {
    let mut stats = RunStats::default();

    while let Some(idx) = scheduler.next_frame() {
        let input = host.poll_input(idx)?;
        let frame = session.render_frame(&input, surface)?;
        if recorder.capture(idx, &frame)? {
            stats.captured += 1;
        }
        host.present(idx, &frame)?;
        stats.frames += 1;

        if input.toggle_recording {
            recorder.toggle(session.canvas())?;
        }
        if input.quit {
            tracing::debug!(frame = idx.0, "host requested quit");
            break;
        }
    }

    recorder.stop()?;
    Ok(stats)
}
