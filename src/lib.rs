//! gridweave reassembles the global state of a spatially partitioned simulation from
//! per-worker snapshot files and renders it as a color-coded animation.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: each worker directory becomes a [`WorkerTile`] (halo stripped)
//! 2. **Discover**: worker directories named `row_col` form a validated [`PartitionMesh`]
//! 3. **Stitch**: tiles are concatenated, per frame, into one [`GlobalGrid`]
//! 4. **Decompose**: channel 0 is the object identity, channels 1..=8 sum to a signal
//! 5. **Normalize**: signal is scaled to `[0, 1]` dataset-wide and hidden under objects
//! 6. **Color**: objects take their [`ColorTable`] color, signal adds a grayscale overlay
//! 7. **Assemble**: frames are ordered into a [`FrameSequence`] and handed to a [`FrameSink`]
//!
//! Runs are fail-fast: a malformed snapshot, an incomplete mesh or an unconfigured object id
//! aborts with a [`GridError`] naming the offender.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assemble;
mod color;
/// Output sinks (in-memory, PNG sequence, ffmpeg MP4).
pub mod encode;
mod foundation;
mod grid;
mod partition;
mod pipeline;
mod render;
mod snapshot;
mod transform;

#[cfg(test)]
#[path = "../tests/support/fixtures.rs"]
mod test_support;

pub use assemble::sequence::{DeliveryOpts, FrameSequence};
pub use color::mapper::{map_frames, object_color, signal_color};
pub use color::named::resolve_color;
pub use color::table::{BACKGROUND_ID, ColorEntry, ColorTable};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use encode::png::PngSequenceSink;
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{CHANNELS, Fps, FrameIndex, Rgb};
pub use foundation::error::{GridError, GridResult};
pub use grid::stitch::{GlobalGrid, stitch_mesh};
pub use grid::volume::{Layer, StateVolume};
pub use partition::registry::{
    MeshShape, MeshSummary, PartitionKey, PartitionMesh, WorkerSummary, discover_partitions,
};
pub use pipeline::{Reconstruction, RenderConfig, reconstruct, render_mesh, render_to_sink};
pub use render::frame::{Frame, FrameRGB8};
pub use snapshot::parser::{
    HALO, SnapshotFrame, WorkerTile, frame_index_from_file_name, load_worker_tile, parse_snapshot,
};
pub use transform::decompose::{DecomposedState, ObjectLayer, SignalLayer, decompose};
pub use transform::normalize::{NormalizedSignal, SignalRange, normalize_signal};
