use std::collections::{BTreeSet, HashMap};

use crate::color::table::{BACKGROUND_ID, ColorTable};
use crate::foundation::core::{FrameIndex, Rgb};
use crate::foundation::error::{GridError, GridResult};
use crate::render::frame::Frame;
use crate::transform::decompose::ObjectLayer;
use crate::transform::normalize::NormalizedSignal;

/// Color contributed by the object occupying a cell.
pub fn object_color(table: &ColorTable, id: i64) -> GridResult<Rgb> {
    if id == BACKGROUND_ID {
        return Ok(table.background());
    }
    table.get(id).ok_or(GridError::UnknownObjectId(id))
}

/// Grayscale overlay for a normalized signal intensity: 0 is black, 1 is white.
pub fn signal_color(intensity: f32) -> Rgb {
    Rgb::WHITE.scaled(intensity)
}

/// Composite object colors and signal overlay into one [`Frame`] per time step.
///
/// Every object id in `objects` is checked against `table` before any pixel is produced;
/// the smallest unknown id fails the whole call.
#[tracing::instrument(skip(objects, signal, table))]
pub fn map_frames(
    objects: &ObjectLayer,
    signal: &NormalizedSignal,
    table: &ColorTable,
) -> GridResult<Vec<Frame>> {
    if !objects.same_shape(&signal.values) {
        return Err(GridError::validation(
            "object layer and normalized signal must have the same shape",
        ));
    }

    let present: BTreeSet<i64> = objects.as_slice().iter().copied().collect();
    let mut palette = HashMap::with_capacity(present.len());
    for id in present {
        palette.insert(id, object_color(table, id)?);
    }

    let (rows, cols) = (objects.rows(), objects.cols());
    let mut frames = Vec::with_capacity(objects.frames());
    for f in 0..objects.frames() {
        let mut rgb = Vec::with_capacity(rows * cols * 3);
        for (id, &intensity) in objects.frame(f).iter().zip(signal.values.frame(f)) {
            let base = palette.get(id).copied().unwrap_or(Rgb::BLACK);
            let c = base.saturating_add(signal_color(intensity));
            rgb.extend_from_slice(&[c.r, c.g, c.b]);
        }
        frames.push(Frame {
            index: FrameIndex(f as u64),
            rows,
            cols,
            rgb,
        });
    }
    tracing::info!(frames = frames.len(), rows, cols, "mapped frames to color");
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/color/mapper.rs"]
mod tests;
