use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Fps;
use crate::foundation::error::{GridError, GridResult};
use crate::render::frame::Frame;

/// How frames are presented to a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeliveryOpts {
    /// Playback rate.
    pub fps: Fps,
    /// Integer upscale applied to every cell.
    pub scale: u32,
}

/// Frames in ascending timeline order, all of one shape.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    rows: usize,
    cols: usize,
}

impl FrameSequence {
    /// Order `frames` by index. Duplicate indices and mixed shapes are rejected.
    pub fn assemble(mut frames: Vec<Frame>) -> GridResult<Self> {
        let Some(first) = frames.first() else {
            return Err(GridError::validation("no frames to assemble"));
        };
        let (rows, cols) = (first.rows, first.cols);
        if let Some(odd) = frames.iter().find(|f| f.rows != rows || f.cols != cols) {
            return Err(GridError::validation(format!(
                "frame {} is {}x{}, expected {rows}x{cols}",
                odd.index.0, odd.rows, odd.cols
            )));
        }
        frames.sort_by_key(|f| f.index);
        if let Some(pair) = frames.windows(2).find(|w| w[0].index == w[1].index) {
            return Err(GridError::validation(format!(
                "frame {} appears twice",
                pair[0].index.0
            )));
        }
        Ok(Self { frames, rows, cols })
    }

    /// Frames in ascending order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Total frame count.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false` for an assembled sequence.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Cell rows per frame.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell columns per frame.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Hand every frame to `sink` in order, bracketed by `begin` and `end`.
    #[tracing::instrument(skip(self, sink))]
    pub fn deliver(&self, sink: &mut dyn FrameSink, opts: DeliveryOpts) -> GridResult<()> {
        let first = self.frames[0].to_rgb8(opts.scale)?;
        sink.begin(SinkConfig {
            width: first.width,
            height: first.height,
            fps: opts.fps,
            frame_count: self.frames.len() as u64,
        })?;
        sink.push_frame(self.frames[0].index, &first)?;
        for frame in &self.frames[1..] {
            sink.push_frame(frame.index, &frame.to_rgb8(opts.scale)?)?;
        }
        sink.end()?;
        tracing::info!(
            frames = self.frames.len(),
            width = first.width,
            height = first.height,
            fps = opts.fps.as_f64(),
            "delivered frame sequence"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/sequence.rs"]
mod tests;
