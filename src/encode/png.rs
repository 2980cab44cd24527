use std::path::PathBuf;

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{GridError, GridResult};
use crate::render::frame::FrameRGB8;

/// Sink that writes every frame as `frame_00001.png`, `frame_00002.png`, ... into a directory.
///
/// File numbers are 1-indexed, matching the snapshot files they were rendered from.
#[derive(Debug)]
pub struct PngSequenceSink {
    out_dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Create a sink writing into `out_dir` (created on `begin`).
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            cfg: None,
            written: Vec::new(),
        }
    }

    /// Files written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name used for `idx`.
    pub fn file_name(idx: FrameIndex) -> String {
        format!("frame_{:05}.png", idx.one_based())
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> GridResult<()> {
        std::fs::create_dir_all(&self.out_dir).with_context(|| {
            format!("failed to create output directory '{}'", self.out_dir.display())
        })?;
        self.cfg = Some(cfg);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGB8) -> GridResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| GridError::encode("png sink not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(GridError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let path = self.out_dir.join(Self::file_name(idx));
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .map_err(|e| GridError::encode(format!("write png '{}': {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> GridResult<()> {
        tracing::info!(
            frames = self.written.len(),
            dir = %self.out_dir.display(),
            "wrote png sequence"
        );
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
