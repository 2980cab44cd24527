use serde::Serialize;

use crate::foundation::error::{GridError, GridResult};
use crate::grid::volume::Layer;
use crate::transform::decompose::{ObjectLayer, SignalLayer};

/// Dataset-wide signal extent used for normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SignalRange {
    /// Smallest aggregated signal over every frame and cell.
    pub min: i64,
    /// Largest aggregated signal over every frame and cell.
    pub max: i64,
    /// `min == max`; every normalized value is 0.
    pub degenerate: bool,
}

impl SignalRange {
    /// Extent of `signals`, or `None` when the layer is empty.
    pub fn of(signals: &SignalLayer) -> Option<Self> {
        let min = *signals.as_slice().iter().min()?;
        let max = *signals.as_slice().iter().max()?;
        Some(Self {
            min,
            max,
            degenerate: min == max,
        })
    }

    /// Map `s` affinely onto `[0, 1]`. Degenerate ranges map everything to 0.
    pub fn normalize(self, s: i64) -> f32 {
        if self.degenerate {
            return 0.0;
        }
        let span = (self.max as f64) - (self.min as f64);
        (((s as f64) - (self.min as f64)) / span).clamp(0.0, 1.0) as f32
    }
}

/// Signal intensities in `[0, 1]`, zero wherever an object is present.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedSignal {
    /// Per-cell intensity, shape `(F, rows, cols)`.
    pub values: Layer<f32>,
    /// Extent the values were normalized against.
    pub range: SignalRange,
}

/// Min-max normalize `signals` over the whole dataset and suppress occupied cells.
#[tracing::instrument(skip(signals, objects))]
pub fn normalize_signal(
    signals: &SignalLayer,
    objects: &ObjectLayer,
) -> GridResult<NormalizedSignal> {
    if !signals.same_shape(objects) {
        return Err(GridError::validation(
            "signal and object layers must have the same shape",
        ));
    }
    let range = SignalRange::of(signals)
        .ok_or_else(|| GridError::validation("cannot normalize an empty signal layer"))?;
    if range.degenerate {
        tracing::warn!(value = range.min, "signal range is degenerate, rendering no signal");
    } else {
        tracing::debug!(min = range.min, max = range.max, "signal range");
    }

    let values = signals
        .as_slice()
        .iter()
        .zip(objects.as_slice())
        .map(|(&s, &obj)| if obj == 0 { range.normalize(s) } else { 0.0 })
        .collect();

    Ok(NormalizedSignal {
        values: Layer::from_vec(signals.frames(), signals.rows(), signals.cols(), values)?,
        range,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/transform/normalize.rs"]
mod tests;
