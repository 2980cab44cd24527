use rayon::prelude::*;

use crate::foundation::core::CHANNELS;
use crate::foundation::error::{GridError, GridResult};
use crate::grid::volume::StateVolume;
use crate::partition::registry::{MeshShape, PartitionKey, PartitionMesh};
use crate::snapshot::parser::WorkerTile;

/// Every worker tile concatenated by mesh position, shape `(F, totalX, totalY, CHANNELS)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalGrid {
    mesh: MeshShape,
    volume: StateVolume,
}

impl GlobalGrid {
    /// Mesh the grid was assembled from.
    pub fn mesh(&self) -> MeshShape {
        self.mesh
    }

    /// Stitched cell states.
    pub fn volume(&self) -> &StateVolume {
        &self.volume
    }

    /// Number of frames.
    pub fn frames(&self) -> usize {
        self.volume.frames()
    }

    /// Global row count.
    pub fn rows(&self) -> usize {
        self.volume.rows()
    }

    /// Global column count.
    pub fn cols(&self) -> usize {
        self.volume.cols()
    }
}

/// Concatenate every tile of a validated mesh into one [`GlobalGrid`].
///
/// Per frame, each mesh row becomes a band by joining its tiles left to right in ascending
/// column order; bands are then stacked top to bottom in ascending row order. Frames are
/// independent, so with `parallel` they are filled on the rayon pool. The output does not
/// depend on that choice.
#[tracing::instrument(skip(mesh))]
pub fn stitch_mesh(mesh: &PartitionMesh, parallel: bool) -> GridResult<GlobalGrid> {
    let shape = mesh.validate()?;

    let mut bands: Vec<Vec<&WorkerTile>> = Vec::with_capacity(shape.rows as usize);
    for row in 1..=shape.rows {
        let band = (1..=shape.cols)
            .map(|col| {
                let key = PartitionKey { row, col };
                mesh.get(key).ok_or_else(|| {
                    GridError::topology(format!("partition {key} vanished after validation"))
                })
            })
            .collect::<GridResult<Vec<_>>>()?;
        bands.push(band);
    }

    let frames = bands[0][0].frames();
    let total_rows: usize = bands.iter().map(|band| band[0].rows()).sum();
    let total_cols: usize = bands[0].iter().map(|tile| tile.cols()).sum();
    let frame_len = total_rows * total_cols * CHANNELS;
    if frame_len == 0 || frames == 0 {
        return Err(GridError::topology("stitched grid would be empty"));
    }

    let mut data = vec![0i64; frames * frame_len];
    let fill = |(f, out): (usize, &mut [i64])| {
        let mut pos = 0;
        for band in &bands {
            for local_row in 0..band[0].rows() {
                for tile in band {
                    let src = tile.volume().row(f, local_row);
                    out[pos..pos + src.len()].copy_from_slice(src);
                    pos += src.len();
                }
            }
        }
    };
    if parallel {
        data.par_chunks_mut(frame_len).enumerate().for_each(fill);
    } else {
        data.chunks_mut(frame_len).enumerate().for_each(fill);
    }

    let volume = StateVolume::from_vec(frames, total_rows, total_cols, data)?;
    tracing::info!(
        frames,
        rows = total_rows,
        cols = total_cols,
        mesh_rows = shape.rows,
        mesh_cols = shape.cols,
        "stitched global grid"
    );
    Ok(GlobalGrid {
        mesh: shape,
        volume,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/grid/stitch.rs"]
mod tests;
