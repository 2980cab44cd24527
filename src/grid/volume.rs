use crate::foundation::core::CHANNELS;
use crate::foundation::error::{GridError, GridResult};

/// Dense per-cell state over time, shape `(frames, rows, cols, CHANNELS)`, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateVolume {
    frames: usize,
    rows: usize,
    cols: usize,
    data: Vec<i64>,
}

impl StateVolume {
    /// Wrap `data`, checking it holds exactly `frames * rows * cols * CHANNELS` values.
    pub fn from_vec(frames: usize, rows: usize, cols: usize, data: Vec<i64>) -> GridResult<Self> {
        let expected = frames * rows * cols * CHANNELS;
        if data.len() != expected {
            return Err(GridError::validation(format!(
                "volume ({frames}, {rows}, {cols}, {CHANNELS}) needs {expected} values, got {}",
                data.len()
            )));
        }
        Ok(Self {
            frames,
            rows,
            cols,
            data,
        })
    }

    /// Number of recorded frames.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Rows per frame.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Columns per frame.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }

    /// Values in one frame.
    pub fn frame_len(&self) -> usize {
        self.rows * self.cols * CHANNELS
    }

    /// Borrow one frame, shape `(rows, cols, CHANNELS)`.
    pub fn frame(&self, f: usize) -> &[i64] {
        let len = self.frame_len();
        &self.data[f * len..(f + 1) * len]
    }

    /// Borrow row `row` of frame `f`, shape `(cols, CHANNELS)`.
    pub fn row(&self, f: usize, row: usize) -> &[i64] {
        let stride = self.cols * CHANNELS;
        let start = f * self.frame_len() + row * stride;
        &self.data[start..start + stride]
    }

    /// Borrow the channel vector of a single cell.
    pub fn cell(&self, f: usize, row: usize, col: usize) -> &[i64] {
        let start = f * self.frame_len() + (row * self.cols + col) * CHANNELS;
        &self.data[start..start + CHANNELS]
    }
}

/// One scalar per cell over time, shape `(frames, rows, cols)`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer<T> {
    frames: usize,
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Layer<T> {
    /// Wrap `data`, checking it holds exactly `frames * rows * cols` values.
    pub fn from_vec(frames: usize, rows: usize, cols: usize, data: Vec<T>) -> GridResult<Self> {
        if data.len() != frames * rows * cols {
            return Err(GridError::validation(format!(
                "layer of shape ({frames}, {rows}, {cols}) needs {} values, got {}",
                frames * rows * cols,
                data.len()
            )));
        }
        Ok(Self {
            frames,
            rows,
            cols,
            data,
        })
    }

    /// Number of frames.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Rows per frame.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Columns per frame.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Borrow one frame, shape `(rows, cols)`.
    pub fn frame(&self, f: usize) -> &[T] {
        let len = self.rows * self.cols;
        &self.data[f * len..(f + 1) * len]
    }

    /// Return `true` when `other` has the same `(frames, rows, cols)`.
    pub fn same_shape<U>(&self, other: &Layer<U>) -> bool {
        self.frames == other.frames && self.rows == other.rows && self.cols == other.cols
    }
}

impl<T: Copy> Layer<T> {
    /// Value at a single cell.
    pub fn get(&self, f: usize, row: usize, col: usize) -> T {
        self.data[(f * self.rows + row) * self.cols + col]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/volume.rs"]
mod tests;
