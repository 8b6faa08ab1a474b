use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{EtherError, EtherResult};
use crate::render::backend::FrameRGBA;

/// Writes each captured frame as `<dir>/<prefix>_<nnnnn>.png`.
///
/// Files are numbered by capture order starting at zero, so every recording reads as a contiguous
/// sequence whatever frame it started on. With [`with_takes`](Self::with_takes) each recording
/// goes to its own `<dir>/take_<nnn>` subdirectory instead of overwriting the previous one; a
/// finished take is that directory, complete once `end` returns.
#[derive(Debug)]
pub struct PngSequenceSink {
    root: PathBuf,
    dir: PathBuf,
    prefix: String,
    takes: Option<u32>,
    cfg: Option<SinkConfig>,
    written: u64,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        let root = dir.into();
        Self {
            dir: root.clone(),
            root,
            prefix: prefix.into(),
            takes: None,
            cfg: None,
            written: 0,
        }
    }

    /// Give every recording its own numbered subdirectory.
    pub fn with_takes(mut self) -> Self {
        self.takes = Some(0);
        self
    }

    /// Directory of the current (or last) sequence.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames written since the last `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Path of the `n`-th frame of a sequence.
    pub fn frame_path(&self, n: u64) -> PathBuf {
        self.dir.join(format!("{}_{n:05}.png", self.prefix))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> EtherResult<()> {
        if let Some(take) = self.takes.as_mut() {
            *take += 1;
            self.dir = self.root.join(format!("take_{take:03}"));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> EtherResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(EtherError::encode("png sequence sink was not started"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(EtherError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        write_png(&self.frame_path(self.written), frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> EtherResult<()> {
        if self.cfg.take().is_some() {
            tracing::info!(
                frames = self.written,
                dir = %self.dir.display(),
                "png sequence written"
            );
        }
        Ok(())
    }
}

/// Write `frame` to `path` as straight-alpha PNG, creating parent directories.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> EtherResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let mut straight = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_in_place(&mut straight);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| EtherError::encode("invalid rgba buffer size"))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
