use crate::foundation::core::{CHANNELS, OBJECT_CHANNEL, SIGNAL_CHANNELS};
use crate::foundation::error::{GridError, GridResult};
use crate::grid::stitch::GlobalGrid;
use crate::grid::volume::Layer;

/// Object identity per cell, shape `(F, rows, cols)`.
pub type ObjectLayer = Layer<i64>;

/// Total signal strength per cell, shape `(F, rows, cols)`.
pub type SignalLayer = Layer<i64>;

/// A [`GlobalGrid`] split into its object and aggregated signal components.
#[derive(Clone, Debug, PartialEq)]
pub struct DecomposedState {
    /// Channel 0 of every cell.
    pub objects: ObjectLayer,
    /// Sum of channels 1 to 8 of every cell. Direction is discarded.
    pub signals: SignalLayer,
}

/// Split the channel dimension of `grid`.
///
/// A signal sum that does not fit in an `i64` is a format error naming the cell.
#[tracing::instrument(skip(grid))]
pub fn decompose(grid: &GlobalGrid) -> GridResult<DecomposedState> {
    let volume = grid.volume();
    let (frames, rows, cols) = (volume.frames(), volume.rows(), volume.cols());
    let cells = volume.as_slice().chunks_exact(CHANNELS);
    let mut objects = Vec::with_capacity(cells.len());
    let mut signals = Vec::with_capacity(cells.len());
    for (i, cell) in cells.enumerate() {
        let signal = cell[SIGNAL_CHANNELS]
            .iter()
            .try_fold(0i64, |acc, &v| acc.checked_add(v))
            .ok_or_else(|| {
                let (f, r, c) = (i / (rows * cols), (i / cols) % rows, i % cols);
                GridError::format(format!(
                    "signal sum of cell ({r}, {c}) in frame {} overflows",
                    f + 1
                ))
            })?;
        objects.push(cell[OBJECT_CHANNEL]);
        signals.push(signal);
    }

    Ok(DecomposedState {
        objects: Layer::from_vec(frames, rows, cols, objects)?,
        signals: Layer::from_vec(frames, rows, cols, signals)?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/transform/decompose.rs"]
mod tests;
