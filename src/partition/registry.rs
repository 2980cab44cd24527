//! Worker discovery and mesh validation.
//!
//! Each worker writes into its own directory named `"{row}_{col}"` (1-indexed). The
//! directory name is parsed exactly once, into a [`PartitionKey`], and the resulting
//! [`PartitionMesh`] is validated before any array operation touches it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;
use serde::Serialize;

use crate::foundation::error::{GridError, GridResult};
use crate::snapshot::parser::{WorkerTile, load_worker_tile};

/// Position of a worker in the logical mesh, 1-indexed. Orders by row, then column.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, serde::Deserialize,
)]
pub struct PartitionKey {
    /// Mesh row, starting at 1.
    pub row: u32,
    /// Mesh column, starting at 1.
    pub col: u32,
}

impl PartitionKey {
    /// Build a key, rejecting zero coordinates.
    pub fn new(row: u32, col: u32) -> GridResult<Self> {
        if row == 0 || col == 0 {
            return Err(GridError::topology(format!(
                "partition ({row}, {col}) is not 1-indexed"
            )));
        }
        Ok(Self { row, col })
    }

    /// Parse a worker directory name of the form `"{row}_{col}"`.
    pub fn from_dir_name(name: &str) -> GridResult<Self> {
        let invalid = || {
            GridError::topology(format!(
                "worker directory '{name}' is not named '<row>_<col>'"
            ))
        };
        let (row, col) = name.split_once('_').ok_or_else(invalid)?;
        let row = row.parse::<u32>().map_err(|_| invalid())?;
        let col = col.parse::<u32>().map_err(|_| invalid())?;
        Self::new(row, col)
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Logical `rows x cols` arrangement of worker tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MeshShape {
    /// Mesh rows `R`.
    pub rows: u32,
    /// Mesh columns `C`.
    pub cols: u32,
}

/// Per-worker entry of a [`MeshSummary`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkerSummary {
    /// Mesh position.
    pub key: PartitionKey,
    /// Interior rows of the tile.
    pub rows: usize,
    /// Interior columns of the tile.
    pub cols: usize,
    /// Directory the tile was read from.
    pub source: PathBuf,
}

/// Serializable description of a validated mesh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MeshSummary {
    /// Mesh layout.
    pub mesh: MeshShape,
    /// Frames recorded by every worker.
    pub frames: usize,
    /// Global grid rows after stitching.
    pub total_rows: usize,
    /// Global grid columns after stitching.
    pub total_cols: usize,
    /// Workers in ascending key order.
    pub workers: Vec<WorkerSummary>,
}

/// All discovered worker tiles keyed by mesh position.
#[derive(Clone, Debug, Default)]
pub struct PartitionMesh {
    tiles: BTreeMap<PartitionKey, WorkerTile>,
}

impl PartitionMesh {
    /// Build a mesh from already-loaded tiles. Call [`PartitionMesh::validate`] before use.
    pub fn from_tiles(tiles: impl IntoIterator<Item = (PartitionKey, WorkerTile)>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    /// Number of workers.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Return `true` when no worker was found.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at `key`, if present.
    pub fn get(&self, key: PartitionKey) -> Option<&WorkerTile> {
        self.tiles.get(&key)
    }

    /// Tiles in ascending `(row, col)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&PartitionKey, &WorkerTile)> {
        self.tiles.iter()
    }

    /// Check that the mesh is a gapless, consistently sized rectangle.
    ///
    /// - keys cover exactly `[1..R] x [1..C]`, where `R` and `C` are the largest row and
    ///   column seen;
    /// - tiles sharing a mesh row have equal row extents, so they can sit side by side;
    /// - tiles sharing a mesh column have equal column extents, so bands line up;
    /// - every tile has the same frame count.
    pub fn validate(&self) -> GridResult<MeshShape> {
        let Some(first) = self.tiles.values().next() else {
            return Err(GridError::topology("no worker partitions found"));
        };
        let rows = self.tiles.keys().map(|k| k.row).max().unwrap_or(0);
        let cols = self.tiles.keys().map(|k| k.col).max().unwrap_or(0);

        for row in 1..=rows {
            for col in 1..=cols {
                let key = PartitionKey { row, col };
                if !self.tiles.contains_key(&key) {
                    return Err(GridError::topology(format!(
                        "partition {key} is missing from a {rows}x{cols} mesh"
                    )));
                }
            }
        }

        let frames = first.frames();
        for (key, tile) in &self.tiles {
            if tile.frames() != frames {
                return Err(GridError::topology(format!(
                    "partition {key} recorded {} frames, partition (1, 1) recorded {frames}",
                    tile.frames()
                )));
            }
            let row_head = PartitionKey { row: key.row, col: 1 };
            let col_head = PartitionKey { row: 1, col: key.col };
            let expected_rows = self.tiles[&row_head].rows();
            let expected_cols = self.tiles[&col_head].cols();
            if tile.rows() != expected_rows {
                return Err(GridError::topology(format!(
                    "{key} has {} rows, {row_head} in its mesh row has {expected_rows}",
                    tile.rows()
                )));
            }
            if tile.cols() != expected_cols {
                return Err(GridError::topology(format!(
                    "{key} has {} columns, {col_head} in its mesh column has {expected_cols}",
                    tile.cols()
                )));
            }
        }

        Ok(MeshShape { rows, cols })
    }

    /// Validate and describe the mesh.
    pub fn summary(&self) -> GridResult<MeshSummary> {
        let mesh = self.validate()?;
        let total_rows = (1..=mesh.rows)
            .map(|row| self.tiles[&PartitionKey { row, col: 1 }].rows())
            .sum();
        let total_cols = (1..=mesh.cols)
            .map(|col| self.tiles[&PartitionKey { row: 1, col }].cols())
            .sum();
        let frames = self.tiles.values().next().map_or(0, WorkerTile::frames);
        let workers = self
            .tiles
            .iter()
            .map(|(key, tile)| WorkerSummary {
                key: *key,
                rows: tile.rows(),
                cols: tile.cols(),
                source: tile.source().to_path_buf(),
            })
            .collect();
        Ok(MeshSummary {
            mesh,
            frames,
            total_rows,
            total_cols,
            workers,
        })
    }
}

/// Find every worker directory under `root` and load its tile.
///
/// Regular files directly under `root` are ignored. With `parallel`, tiles load on the
/// current rayon pool; the resulting mesh is identical either way.
#[tracing::instrument]
pub fn discover_partitions(root: &Path, parallel: bool) -> GridResult<PartitionMesh> {
    let mut dirs: Vec<(PartitionKey, PathBuf)> = Vec::new();
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("read grids directory '{}'", root.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("list '{}'", root.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat '{}'", entry.path().display()))?;
        if name.starts_with('.') || !file_type.is_dir() {
            tracing::debug!(entry = %name, "skipping non-worker entry");
            continue;
        }
        dirs.push((PartitionKey::from_dir_name(&name)?, entry.path()));
    }
    dirs.sort();
    if let Some(pair) = dirs.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(GridError::topology(format!(
            "partition {} is claimed by both '{}' and '{}'",
            pair[0].0,
            pair[0].1.display(),
            pair[1].1.display()
        )));
    }

    let tiles: Vec<(PartitionKey, WorkerTile)> = if parallel {
        dirs.into_par_iter()
            .map(|(key, dir)| load_worker_tile(&dir).map(|tile| (key, tile)))
            .collect::<GridResult<_>>()?
    } else {
        dirs.into_iter()
            .map(|(key, dir)| load_worker_tile(&dir).map(|tile| (key, tile)))
            .collect::<GridResult<_>>()?
    };

    let mesh = PartitionMesh::from_tiles(tiles);
    tracing::info!(workers = mesh.len(), root = %root.display(), "discovered worker partitions");
    Ok(mesh)
}

#[cfg(test)]
#[path = "../../tests/unit/partition/registry.rs"]
mod tests;
