use crate::foundation::core::NodeId;

/// Crate-wide result alias.
pub type ViewKitResult<T> = Result<T, ViewKitError>;

/// Error type shared by the document model, transitions and view ports.
#[derive(thiserror::Error, Debug)]
pub enum ViewKitError {
    /// Operation is not valid in the current state (e.g. replacing on an empty stack).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Index outside `[0, len)`.
    #[error("index {index} out of range (len {len})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of selectable items.
        len: usize,
    },

    /// A transition's completion signals did not arrive before its watchdog fired.
    #[error(
        "transition timeout: '{transition}' force-completed after {elapsed_s:.3}s with {pending} element(s) still animating"
    )]
    TransitionTimeout {
        /// Choreography name of the timed out transition.
        transition: &'static str,
        /// Seconds between the run start and the watchdog firing.
        elapsed_s: f64,
        /// Elements that never signalled completion.
        pending: usize,
    },

    /// Node id does not refer to a live document node.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Invalid configuration value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, typically raised by application `View` code.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ViewKitError {
    /// Build an [`ViewKitError::InvalidOperation`].
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Build an [`ViewKitError::OutOfRange`].
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Build a [`ViewKitError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ViewKitError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ViewKitError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
