use crate::foundation::core::{FrameIndex, Rgb, unit_to_u8};
use crate::foundation::error::{GridError, GridResult};

/// One composited time step: `rows x cols` RGB values in `[0, 1]`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Position in the recorded timeline.
    pub index: FrameIndex,
    /// Global grid rows.
    pub rows: usize,
    /// Global grid columns.
    pub cols: usize,
    /// Interleaved `r, g, b` per cell.
    pub rgb: Vec<f32>,
}

impl Frame {
    /// Color of one cell.
    pub fn pixel(&self, row: usize, col: usize) -> Rgb {
        let i = (row * self.cols + col) * 3;
        Rgb::new(self.rgb[i], self.rgb[i + 1], self.rgb[i + 2])
    }

    /// Quantize to 8-bit RGB, upscaling every cell into a `scale x scale` block.
    ///
    /// Columns become image width and rows become image height.
    pub fn to_rgb8(&self, scale: u32) -> GridResult<FrameRGB8> {
        if scale == 0 {
            return Err(GridError::validation("frame scale must be >= 1"));
        }
        let s = scale as usize;
        let width = u32::try_from(self.cols * s)
            .map_err(|_| GridError::validation("scaled frame width overflows u32"))?;
        let height = u32::try_from(self.rows * s)
            .map_err(|_| GridError::validation("scaled frame height overflows u32"))?;

        let mut line = Vec::with_capacity(self.cols * s * 3);
        let mut data = Vec::with_capacity(self.rows * s * self.cols * s * 3);
        for row in 0..self.rows {
            line.clear();
            for px in self.rgb[row * self.cols * 3..(row + 1) * self.cols * 3].chunks_exact(3) {
                let rgb = [unit_to_u8(px[0]), unit_to_u8(px[1]), unit_to_u8(px[2])];
                for _ in 0..s {
                    line.extend_from_slice(&rgb);
                }
            }
            for _ in 0..s {
                data.extend_from_slice(&line);
            }
        }
        Ok(FrameRGB8 {
            width,
            height,
            data,
        })
    }
}

/// A frame as tightly packed 8-bit RGB pixels, ready for a sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGB8 {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB8 bytes, row-major.
    pub data: Vec<u8>,
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
