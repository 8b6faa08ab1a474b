use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{EtherError, EtherResult};
use crate::foundation::math::flatten_to_opaque_rgba8;
use crate::render::backend::FrameRGBA;

/// Validate the output geometry for yuv420p MP4 encoding.
pub fn validate_encode_config(cfg: &SinkConfig) -> EtherResult<()> {
    if cfg.width == 0 || cfg.height == 0 {
        return Err(EtherError::validation(
            "encode width/height must be non-zero",
        ));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(EtherError::validation(
            "encode width/height must be even (required for yuv420p mp4 output)",
        ));
    }
    Ok(())
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> EtherResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// MP4 sink piping raw frames into the system `ffmpeg` binary.
///
/// Frames are flattened over `bg_rgba` to opaque RGBA before encoding.
pub struct FfmpegSink {
    out_path: PathBuf,
    overwrite: bool,
    bg_rgba: [u8; 4],
    running: Option<Running>,
}

struct Running {
    cfg: SinkConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegSink {
    pub fn new(out_path: impl Into<PathBuf>, bg_rgba: [u8; 4]) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba,
            running: None,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    #[tracing::instrument(skip_all, fields(out = %self.out_path.display()))]
    fn spawn(&self, cfg: SinkConfig) -> EtherResult<Running> {
        validate_encode_config(&cfg)?;
        ensure_parent_dir(&self.out_path)?;

        if !self.overwrite && self.out_path.exists() {
            return Err(EtherError::validation(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(EtherError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &format!("{}/{}", cfg.fps.num, cfg.fps.den),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&self.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            EtherError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| EtherError::encode("failed to open ffmpeg stdin (unexpected)"))?;

        tracing::debug!(width = cfg.width, height = cfg.height, "ffmpeg started");
        Ok(Running {
            scratch: vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4],
            cfg,
            child,
            stdin: Some(stdin),
        })
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> EtherResult<()> {
        if self.running.is_some() {
            return Err(EtherError::encode("ffmpeg sink is already running"));
        }
        self.running = Some(self.spawn(cfg)?);
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> EtherResult<()> {
        let Some(run) = self.running.as_mut() else {
            return Err(EtherError::encode("ffmpeg sink was not started"));
        };
        if frame.width != run.cfg.width || frame.height != run.cfg.height {
            return Err(EtherError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, run.cfg.width, run.cfg.height
            )));
        }

        flatten_to_opaque_rgba8(
            &mut run.scratch,
            &frame.data,
            frame.premultiplied,
            self.bg_rgba,
        )?;

        let Some(stdin) = run.stdin.as_mut() else {
            return Err(EtherError::encode("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&run.scratch).map_err(|e| {
            EtherError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        Ok(())
    }

    fn end(&mut self) -> EtherResult<()> {
        let Some(mut run) = self.running.take() else {
            return Ok(());
        };
        drop(run.stdin.take());

        let output = run.child.wait_with_output().map_err(|e| {
            EtherError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EtherError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::info!(out = %self.out_path.display(), "mp4 written");
        Ok(())
    }
}
