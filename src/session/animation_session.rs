use crate::animation::clock::{AnimationClock, AnimationState};
use crate::animation::contour::ContourGenerator;
use crate::config::Config;
use crate::field::noise::{FbmNoise, NoiseField};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{EtherError, EtherResult};
use crate::outline::OutlineRing;
use crate::render::backend::{FrameRGBA, FramePlan, RenderSurface, draw_plan};
use crate::render::viewport::Viewport;

/// Per-frame input snapshot.
///
/// Pointer position and pressed flag are sampled once per frame and stay constant while that
/// frame is generated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer in surface pixels; `None` when outside the surface or unknown.
    pub pointer: Option<Point>,
    /// Primary button held.
    pub pressed: bool,
    /// New surface size, applied before the frame is generated.
    pub resize: Option<Canvas>,
    /// Flip the recording state after this frame is drawn.
    pub toggle_recording: bool,
    /// Stop the loop after this frame.
    pub quit: bool,
}

/// Owns the outline, the animation state and the generator; turns inputs into frame plans.
///
/// A session front-loads config validation and noise construction, then each [`step`] advances
/// the clock by one frame and plans the frame for the new state.
///
/// [`step`]: AnimationSession::step
pub struct AnimationSession<N: NoiseField = FbmNoise> {
    config: Config,
    clock: AnimationClock,
    generator: ContourGenerator<N>,
    ring: OutlineRing,
    viewport: Viewport,
    state: AnimationState,
}

impl AnimationSession<FbmNoise> {
    /// Session over `ring` using fractal Perlin noise seeded from `config.noise_seed`.
    pub fn new(config: Config, ring: OutlineRing, canvas: Canvas) -> EtherResult<Self> {
        let noise = FbmNoise::new(config.noise_seed);
        Self::with_noise(config, ring, canvas, noise)
    }
}

impl<N: NoiseField> AnimationSession<N> {
    /// Session with a caller-supplied noise oracle.
    pub fn with_noise(
        config: Config,
        ring: OutlineRing,
        canvas: Canvas,
        noise: N,
    ) -> EtherResult<Self> {
        config.validate()?;
        if canvas.is_empty() {
            return Err(EtherError::validation("canvas width/height must be non-zero"));
        }
        if ring.is_empty() {
            tracing::warn!("outline ring is empty; frames will show only the background");
        }

        let clock = AnimationClock::from_config(&config);
        let state = clock.initial_state();
        tracing::info!(
            bands = config.num_bands,
            samples = ring.len(),
            width = canvas.width,
            height = canvas.height,
            "animation session created"
        );
        Ok(Self {
            generator: ContourGenerator::new(&config, noise),
            viewport: Viewport::new(canvas, config.reference_size),
            clock,
            config,
            ring,
            state,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ring(&self) -> &OutlineRing {
        &self.ring
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn canvas(&self) -> Canvas {
        self.viewport.canvas()
    }

    pub fn generator(&self) -> &ContourGenerator<N> {
        &self.generator
    }

    /// Apply a surface resize. Zero-sized surfaces are ignored.
    pub fn resize(&mut self, canvas: Canvas) {
        if canvas.is_empty() || canvas == self.viewport.canvas() {
            return;
        }
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            "surface resized"
        );
        self.viewport.resize(canvas);
    }

    /// Apply `input` and advance the clock one frame without generating geometry.
    pub fn advance(&mut self, input: &FrameInput) {
        if let Some(canvas) = input.resize {
            self.resize(canvas);
        }
        self.state = self.clock.advance(self.state, input.pressed);
        tracing::trace!(frame = self.state.frame, pressed = input.pressed, "advance");
    }

    /// Advance one frame and plan it.
    ///
    /// The plan reads the advanced state, so the first frame already carries one `speed` of
    /// progress.
    pub fn step(&mut self, input: &FrameInput) -> FramePlan {
        self.advance(input);
        self.plan(input.pointer)
    }

    /// Plan a frame for the current state without advancing.
    pub fn plan(&self, pointer: Option<Point>) -> FramePlan {
        let cfg = &self.config;
        let rotation = (self.state.frame as f64) * cfg.rotation_speed;
        let progress_scale = 1.0 - self.state.progress() * (1.0 - cfg.progress_size_scale);
        let transform = self.viewport.frame_transform(rotation, progress_scale);
        let pointer = pointer.map(|p| transform.pointer_sample(p));

        FramePlan {
            canvas: self.viewport.canvas(),
            transform,
            background: cfg.background,
            stroke_width: cfg.stroke_weight,
            bands: self
                .generator
                .generate_frame(&self.ring, &self.state, pointer.as_ref()),
        }
    }

    /// [`step`](Self::step), then draw the plan onto `surface`.
    pub fn render_frame(
        &mut self,
        input: &FrameInput,
        surface: &mut dyn RenderSurface,
    ) -> EtherResult<FrameRGBA> {
        let plan = self.step(input);
        draw_plan(surface, &plan)
    }
}
