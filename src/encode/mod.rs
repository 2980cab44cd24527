//! Output sinks.
//!
//! Sinks consume finished frames in timeline order; see
//! [`FrameSequence::deliver`](crate::FrameSequence::deliver).

/// `ffmpeg`-based MP4 output via the system `ffmpeg` binary.
pub mod ffmpeg;
/// One PNG file per frame.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
