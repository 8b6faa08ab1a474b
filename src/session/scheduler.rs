use std::time::{Duration, Instant};

use crate::foundation::core::{Fps, FrameIndex, FrameRange};

/// Frame cadence: decides when the next frame happens and whether there is one.
pub trait Scheduler {
    /// Block until the next frame is due and return its index, or `None` when finished.
    fn next_frame(&mut self) -> Option<FrameIndex>;
}

/// Every frame of a range, back to back.
#[derive(Clone, Debug)]
pub struct FixedFrames {
    next: u64,
    end: u64,
}

impl FixedFrames {
    pub fn new(range: FrameRange) -> Self {
        Self {
            next: range.start.0,
            end: range.end.0,
        }
    }

    /// Frames `0..count`.
    pub fn count(count: u64) -> Self {
        Self {
            next: 0,
            end: count,
        }
    }
}

impl Scheduler for FixedFrames {
    fn next_frame(&mut self) -> Option<FrameIndex> {
        if self.next >= self.end {
            return None;
        }
        let idx = FrameIndex(self.next);
        self.next += 1;
        Some(idx)
    }
}

/// Never-ending frame counter; the host ends the loop.
#[derive(Clone, Debug, Default)]
pub struct Unbounded {
    next: u64,
}

impl Scheduler for Unbounded {
    fn next_frame(&mut self) -> Option<FrameIndex> {
        let idx = FrameIndex(self.next);
        self.next = self.next.saturating_add(1);
        Some(idx)
    }
}

/// Wraps another scheduler and sleeps so frames are at least one period apart.
///
/// Deadlines advance by whole periods; a frame that runs late resets the deadline instead of
/// bursting to catch up.
#[derive(Debug)]
pub struct Paced<S> {
    inner: S,
    period: Duration,
    deadline: Option<Instant>,
}

impl<S: Scheduler> Paced<S> {
    pub fn new(inner: S, fps: Fps) -> Self {
        Self {
            inner,
            period: Duration::from_secs_f64(fps.frame_duration_secs()),
            deadline: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl<S: Scheduler> Scheduler for Paced<S> {
    fn next_frame(&mut self) -> Option<FrameIndex> {
        let idx = self.inner.next_frame()?;
        let now = Instant::now();
        let due = match self.deadline {
            Some(deadline) if deadline > now => {
                std::thread::sleep(deadline - now);
                deadline
            }
            _ => now,
        };
        self.deadline = Some(due + self.period);
        Some(idx)
    }
}
