/// Convenience result type used across gridweave.
pub type GridResult<T> = Result<T, GridError>;

/// Top-level error taxonomy.
///
/// Every variant except [`GridError::Other`] aborts a run with the offending identifier
/// (file name, partition key or object id) in its message.
#[derive(thiserror::Error, Debug)]
pub enum GridError {
    /// Malformed snapshot file or snapshot directory.
    #[error("snapshot format error: {0}")]
    Format(String),

    /// Incomplete or non-rectangular worker mesh, or inconsistent tile extents.
    #[error("partition topology error: {0}")]
    Topology(String),

    /// An object identity present in the grid has no color table entry.
    #[error("unknown object id: {0}")]
    UnknownObjectId(i64),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while handing frames to an output sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridError {
    /// Build a [`GridError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`GridError::Topology`] value.
    pub fn topology(msg: impl Into<String>) -> Self {
        Self::Topology(msg.into())
    }

    /// Build a [`GridError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
