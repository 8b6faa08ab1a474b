//! # Etherloop guide
//!
//! This module is a standalone walkthrough of Etherloop's architecture and public API. If you are
//! looking for commands, start with the repository `README.md`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`OutlineRing`](crate::OutlineRing): the base shape, `S` centroid-centered points sampled at
//!   equal arc-length spacing
//! - [`AnimationState`](crate::AnimationState): the accumulators (`elapsed`, `wave_phase`,
//!   `noise_time`, `color_hue`, `frame`)
//! - [`AnimationClock`](crate::AnimationClock): the pure per-frame advance rule
//! - [`ContourGenerator`](crate::ContourGenerator): ring + state + pointer to band polylines
//! - [`FramePlan`](crate::FramePlan): everything a surface needs to draw one frame
//! - [`RenderSurface`](crate::RenderSurface): immediate-mode stroke surface, with
//!   [`CpuSurface`](crate::CpuSurface) as the built-in implementation
//! - [`FrameRecorder`](crate::FrameRecorder): gates a [`FrameSink`](crate::FrameSink) behind the
//!   recording toggle
//!
//! A frame is explicitly staged:
//!
//! 1. Advance: [`AnimationClock::advance`](crate::AnimationClock::advance)
//! 2. Plan: [`AnimationSession::step`](crate::AnimationSession::step)
//! 3. Draw: [`draw_plan`](crate::draw_plan)
//! 4. Capture: [`FrameRecorder::capture`](crate::FrameRecorder::capture)
//!
//! [`run_loop`](crate::run_loop) strings these together under a
//! [`Scheduler`](crate::Scheduler) and a [`FrameHost`](crate::FrameHost).
//!
//! ---
//!
//! ## The displacement model
//!
//! For band `i` of `N` and ring sample `k` of `S`:
//!
//! ```text
//! angle      = 2π k / S
//! band       = lerp(-thickness/2, thickness/2, i / (N - 1))
//! n          = noise(map(cos angle) + i*dec, map(sin angle) + i*dec, noise_time)
//! noise_disp = lerp(-noise_range/2, noise_range, n) * progress
//! wave_disp  = sin(angle * wave_freq_angle + wave_phase) * wave_amp * progress
//! vertex     = base + unit(base) * (band + noise_disp + wave_disp)
//! ```
//!
//! `angle` is the sample index re-parameterized onto the circle, not the geometric angle of the
//! sample. The noise range is deliberately asymmetric: bands bulge outward more than they pinch.
//!
//! `progress = clamp(elapsed, 0, 1)` ramps the displacement in, so the very first frames show
//! the bare band stack.
//!
//! The polyline is closed by repeating vertex 0, so closure holds bit-for-bit for any
//! `wave_freq_angle`.
//!
//! ---
//!
//! ## Press mode and continuity
//!
//! Holding the pointer button freezes the wave phase, doubles the noise rate and steers the hue
//! toward `color_hue_pressed`. None of this touches the accumulated values; only the per-frame
//! increments change. Toggling the button therefore never makes the shape jump.
//!
//! ---
//!
//! ## Screen space
//!
//! Local geometry is centered on the surface, rotated by `frame * rotation_speed` and scaled by
//! `min(w, h) / reference_size` times `1 - progress * (1 - progress_size_scale)`.
//!
//! Pointer attraction works in screen pixels: the raw pointer is counter-rotated around the
//! surface center, vertices are multiplied by the frame scale, the pull is computed, and the pull
//! is divided back into local units. The influence radius is therefore the same number of pixels
//! at every window size.
//!
//! ---
//!
//! ## Pixels
//!
//! [`FrameRGBA`](crate::FrameRGBA) carries RGBA8 bytes plus a `premultiplied` flag. The CPU
//! surface produces premultiplied pixels; the PNG writer un-premultiplies, and the MP4 sink
//! flattens over the background before piping raw frames to `ffmpeg`.
//!
//! ---
//!
//! ## Failure model
//!
//! - The generator is total: any finite configuration and ring give finite polylines.
//! - A missing or unparseable outline degrades to the empty ring
//!   ([`OutlineRing::load_or_empty`](crate::OutlineRing::load_or_empty)); frames then show only
//!   the background.
//! - Config problems are rejected once, up front, by
//!   [`Config::validate`](crate::Config::validate).
//! - Capture failures end the current recording and surface as
//!   [`EtherError::Encode`](crate::EtherError::Encode).
//!
//! ---
//!
//! ## Concurrency
//!
//! The loop is single-threaded and frame-driven. With `parallel_bands` the bands of one frame are
//! generated on the rayon pool; output order (and therefore draw order) is unchanged.
