//! Per-worker snapshot reading.
//!
//! A worker directory holds one file per recorded frame. Each file is a whitespace-separated
//! list of integers: `X Y` followed by `X * Y * CHANNELS` cell values in row-major order,
//! including a 1-cell halo on every side. The frame number (1-indexed) is the part of the
//! file stem after its last `_`, e.g. `grid_12.txt`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{CHANNELS, FrameIndex};
use crate::foundation::error::{GridError, GridResult};
use crate::grid::volume::StateVolume;

/// Width of the neighbor-exchange border around every worker tile.
pub const HALO: usize = 1;

/// One parsed snapshot with its halo already stripped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotFrame {
    /// Declared row count, halo included.
    pub x: usize,
    /// Declared column count, halo included.
    pub y: usize,
    /// Interior cells, shape `(x - 2, y - 2, CHANNELS)`.
    pub interior: Vec<i64>,
}

impl SnapshotFrame {
    /// Interior row count.
    pub fn rows(&self) -> usize {
        self.x - 2 * HALO
    }

    /// Interior column count.
    pub fn cols(&self) -> usize {
        self.y - 2 * HALO
    }
}

/// A worker's full recording: every frame, halo stripped. Immutable once loaded.
#[derive(Clone, Debug)]
pub struct WorkerTile {
    source: PathBuf,
    volume: StateVolume,
}

impl WorkerTile {
    /// Wrap an already-stripped volume. `source` is only used in diagnostics.
    pub fn new(source: impl Into<PathBuf>, volume: StateVolume) -> Self {
        Self {
            source: source.into(),
            volume,
        }
    }

    /// Directory the tile was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Cell states, shape `(frames, rows, cols, CHANNELS)`.
    pub fn volume(&self) -> &StateVolume {
        &self.volume
    }

    /// Number of recorded frames.
    pub fn frames(&self) -> usize {
        self.volume.frames()
    }

    /// Interior rows.
    pub fn rows(&self) -> usize {
        self.volume.rows()
    }

    /// Interior columns.
    pub fn cols(&self) -> usize {
        self.volume.cols()
    }
}

/// Parse one snapshot file's content. `origin` names the file in error messages.
pub fn parse_snapshot(text: &str, origin: &str) -> GridResult<SnapshotFrame> {
    let mut values = Vec::with_capacity(text.len() / 2);
    for (i, tok) in text.split_ascii_whitespace().enumerate() {
        let v: i64 = tok.parse().map_err(|_| {
            GridError::format(format!(
                "'{origin}': token {i} (\"{tok}\") is not an integer"
            ))
        })?;
        values.push(v);
    }

    if values.len() < 2 {
        return Err(GridError::format(format!(
            "'{origin}': missing (X, Y) header"
        )));
    }
    let (x, y) = (values[0], values[1]);
    if x < (2 * HALO + 1) as i64 || y < (2 * HALO + 1) as i64 {
        return Err(GridError::format(format!(
            "'{origin}': tile {x}x{y} leaves no interior after stripping the halo"
        )));
    }
    let too_large = || GridError::format(format!("'{origin}': tile {x}x{y} is too large"));
    let x = usize::try_from(x).map_err(|_| too_large())?;
    let y = usize::try_from(y).map_err(|_| too_large())?;

    let expected = x
        .checked_mul(y)
        .and_then(|n| n.checked_mul(CHANNELS))
        .and_then(|n| n.checked_add(2))
        .ok_or_else(too_large)?;
    if values.len() != expected {
        return Err(GridError::format(format!(
            "'{origin}': expected {expected} integers for a {x}x{y} tile, found {}",
            values.len()
        )));
    }

    let cells = &values[2..];
    let stride = y * CHANNELS;
    let mut interior = Vec::with_capacity((x - 2 * HALO) * (y - 2 * HALO) * CHANNELS);
    for row in HALO..x - HALO {
        let start = row * stride + HALO * CHANNELS;
        let end = row * stride + (y - HALO) * CHANNELS;
        interior.extend_from_slice(&cells[start..end]);
    }

    Ok(SnapshotFrame { x, y, interior })
}

/// Recover the frame index encoded in a snapshot file name.
pub fn frame_index_from_file_name(name: &str) -> GridResult<FrameIndex> {
    let stem = name.split('.').next().unwrap_or(name);
    let digits = stem.rsplit('_').next().unwrap_or(stem);
    digits
        .parse::<u64>()
        .ok()
        .and_then(FrameIndex::from_one_based)
        .ok_or_else(|| {
            GridError::format(format!(
                "file name '{name}' does not encode a 1-indexed frame number"
            ))
        })
}

/// Read every snapshot in `dir` into one [`WorkerTile`].
///
/// The frame numbers must be exactly `1..=F` where `F` is the number of snapshot files;
/// gaps and duplicates are fatal.
#[tracing::instrument]
pub fn load_worker_tile(dir: &Path) -> GridResult<WorkerTile> {
    let mut files: BTreeMap<FrameIndex, PathBuf> = BTreeMap::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read worker directory '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat '{}'", entry.path().display()))?;
        if file_type.is_dir() {
            continue;
        }
        let idx = frame_index_from_file_name(&name)?;
        if let Some(prev) = files.insert(idx, entry.path()) {
            return Err(GridError::format(format!(
                "frame {} appears twice in '{}': '{}' and '{name}'",
                idx.one_based(),
                dir.display(),
                prev.display()
            )));
        }
    }

    let frames = files.len();
    if frames == 0 {
        return Err(GridError::format(format!(
            "worker directory '{}' contains no snapshot files",
            dir.display()
        )));
    }
    let missing: Vec<u64> = (0..frames as u64)
        .filter(|f| !files.contains_key(&FrameIndex(*f)))
        .map(|f| f + 1)
        .collect();
    if !missing.is_empty() {
        return Err(GridError::format(format!(
            "worker directory '{}' is missing frame(s) {missing:?}",
            dir.display()
        )));
    }

    let mut data = Vec::new();
    let mut dims: Option<(usize, usize)> = None;
    for path in files.values() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read snapshot '{}'", path.display()))?;
        let origin = path.display().to_string();
        let snap = parse_snapshot(&text, &origin)?;
        match dims {
            None => {
                dims = Some((snap.x, snap.y));
                data.reserve(frames * snap.interior.len());
            }
            Some(d) if d != (snap.x, snap.y) => {
                return Err(GridError::format(format!(
                    "'{origin}' declares a {}x{} tile, earlier frames are {}x{}",
                    snap.x, snap.y, d.0, d.1
                )));
            }
            Some(_) => {}
        }
        data.extend_from_slice(&snap.interior);
    }

    let (x, y) = dims.unwrap_or((2 * HALO, 2 * HALO));
    let volume = StateVolume::from_vec(frames, x - 2 * HALO, y - 2 * HALO, data)?;
    tracing::debug!(
        dir = %dir.display(),
        frames,
        rows = volume.rows(),
        cols = volume.cols(),
        "loaded worker tile"
    );
    Ok(WorkerTile::new(dir, volume))
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/parser.rs"]
mod tests;
