use crate::foundation::error::{GridError, GridResult};

/// Number of integers stored per cell: one object identity followed by 8 directional signals.
pub const CHANNELS: usize = 9;

/// Channel holding the object identity of a cell.
pub const OBJECT_CHANNEL: usize = 0;

/// Channels holding the directional signal values of a cell.
pub const SIGNAL_CHANNELS: std::ops::Range<usize> = 1..CHANNELS;

/// Absolute 0-based frame index in the recorded timeline.
///
/// Snapshot files are numbered from 1 on disk; the parser converts on read.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Convert a 1-indexed on-disk frame number into a [`FrameIndex`].
    pub fn from_one_based(n: u64) -> Option<Self> {
        n.checked_sub(1).map(Self)
    }

    /// The 1-indexed number used in file names.
    pub fn one_based(self) -> u64 {
        self.0 + 1
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> GridResult<Self> {
        if den == 0 {
            return Err(GridError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(GridError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate showing each frame for `interval_ms` milliseconds.
    pub fn from_interval_ms(interval_ms: u32) -> GridResult<Self> {
        if interval_ms == 0 {
            return Err(GridError::validation("frame interval must be > 0 ms"));
        }
        Self::new(1000, interval_ms)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }
}

/// Normalized RGB color, each component in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Rgb {
    /// Black, the background of empty cells.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White, the full-intensity signal color.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Build a color from components in `[0, 1]`.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from 8-bit components.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Scale every component by `k`.
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// Component-wise sum, clamped to `[0, 1]`.
    pub fn saturating_add(self, other: Self) -> Self {
        Self::new(
            (self.r + other.r).clamp(0.0, 1.0),
            (self.g + other.g).clamp(0.0, 1.0),
            (self.b + other.b).clamp(0.0, 1.0),
        )
    }

    /// Convert to 8-bit components with rounding.
    pub fn to_u8(self) -> [u8; 3] {
        [unit_to_u8(self.r), unit_to_u8(self.g), unit_to_u8(self.b)]
    }
}

/// Map a `[0, 1]` float to `0..=255`, clamping out-of-range input.
pub fn unit_to_u8(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
