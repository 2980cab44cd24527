//! End-to-end reconstruction: snapshots on disk to an ordered frame sequence.
//!
//! 1. [`discover_partitions`]: load every worker tile
//! 2. [`stitch_mesh`]: concatenate tiles into one global grid
//! 3. [`decompose`]: split object identity and aggregated signal
//! 4. [`normalize_signal`]: dataset-wide min-max, suppressed under objects
//! 5. [`map_frames`]: composite colors per cell
//! 6. [`FrameSequence::assemble`]: order frames for delivery

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::assemble::sequence::{DeliveryOpts, FrameSequence};
use crate::color::mapper::map_frames;
use crate::color::table::ColorTable;
use crate::encode::sink::FrameSink;
use crate::foundation::core::Fps;
use crate::foundation::error::{GridError, GridResult};
use crate::grid::stitch::stitch_mesh;
use crate::partition::registry::{MeshSummary, PartitionMesh, discover_partitions};
use crate::transform::decompose::decompose;
use crate::transform::normalize::{SignalRange, normalize_signal};

/// Everything a run needs. All defaults live in the [`Default`] impl.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Directory holding one `"{row}_{col}"` sub-directory per worker.
    pub grids_dir: PathBuf,
    /// `label,number,color` CSV file.
    pub color_config: PathBuf,
    /// How long each frame is shown, in milliseconds.
    pub interval_ms: u32,
    /// Integer upscale from cells to output pixels.
    pub scale: u32,
    /// Load tiles and stitch frames on a rayon pool.
    pub parallel: bool,
    /// Worker threads for the parallel pool; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            grids_dir: PathBuf::from("lib/grid_iterations"),
            color_config: PathBuf::from("config/animation_config.csv"),
            interval_ms: 500,
            scale: 1,
            parallel: false,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Defaults resolved against a simulation project directory.
    pub fn for_project(project_dir: &Path) -> Self {
        let defaults = Self::default();
        Self {
            grids_dir: project_dir.join(defaults.grids_dir),
            color_config: project_dir.join(defaults.color_config),
            ..Self::default()
        }
    }

    /// Load a JSON config; missing fields take their defaults.
    pub fn from_json_path(path: &Path) -> GridResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open render config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(std::io::BufReader::new(f)).map_err(|e| {
            GridError::validation(format!("parse render config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values no run can use.
    pub fn validate(&self) -> GridResult<()> {
        if self.interval_ms == 0 {
            return Err(GridError::validation("interval_ms must be > 0"));
        }
        if self.scale == 0 {
            return Err(GridError::validation("scale must be >= 1"));
        }
        if self.threads == Some(0) {
            return Err(GridError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Playback rate implied by `interval_ms`.
    pub fn fps(&self) -> GridResult<Fps> {
        Fps::from_interval_ms(self.interval_ms)
    }

    /// Delivery options for [`FrameSequence::deliver`].
    pub fn delivery_opts(&self) -> GridResult<DeliveryOpts> {
        Ok(DeliveryOpts {
            fps: self.fps()?,
            scale: self.scale,
        })
    }
}

/// Result of a reconstruction run.
#[derive(Clone, Debug)]
pub struct Reconstruction {
    /// Validated mesh layout and extents.
    pub summary: MeshSummary,
    /// Signal extent used for normalization.
    pub signal_range: SignalRange,
    /// Frames ready for delivery.
    pub sequence: FrameSequence,
}

/// Transform an already-discovered mesh into frames.
pub fn render_mesh(
    mesh: &PartitionMesh,
    table: &ColorTable,
    parallel: bool,
) -> GridResult<(FrameSequence, SignalRange)> {
    let grid = stitch_mesh(mesh, parallel)?;
    let state = decompose(&grid)?;
    drop(grid);
    let signal = normalize_signal(&state.signals, &state.objects)?;
    let frames = map_frames(&state.objects, &signal, table)?;
    Ok((FrameSequence::assemble(frames)?, signal.range))
}

/// Load, stitch, transform and color every frame described by `cfg`.
#[tracing::instrument(skip(cfg), fields(grids = %cfg.grids_dir.display()))]
pub fn reconstruct(cfg: &RenderConfig) -> GridResult<Reconstruction> {
    cfg.validate()?;
    let table = ColorTable::from_csv_path(&cfg.color_config)?;

    let run = || -> GridResult<Reconstruction> {
        let mesh = discover_partitions(&cfg.grids_dir, cfg.parallel)?;
        let summary = mesh.summary()?;
        let (sequence, signal_range) = render_mesh(&mesh, &table, cfg.parallel)?;
        Ok(Reconstruction {
            summary,
            signal_range,
            sequence,
        })
    };

    match (cfg.parallel, cfg.threads) {
        (true, Some(threads)) => build_thread_pool(threads)?.install(run),
        _ => run(),
    }
}

/// [`reconstruct`], then hand the frames to `sink`.
pub fn render_to_sink(cfg: &RenderConfig, sink: &mut dyn FrameSink) -> GridResult<Reconstruction> {
    let out = reconstruct(cfg)?;
    out.sequence.deliver(sink, cfg.delivery_opts()?)?;
    Ok(out)
}

fn build_thread_pool(threads: usize) -> GridResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| GridError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/config.rs"]
mod tests;
