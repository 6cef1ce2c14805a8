use std::sync::atomic::{AtomicU64, Ordering};

pub use kurbo::{Size, Vec2};

/// Handle to an element in a [`Document`](crate::Document).
///
/// Ids are allocated monotonically and never reused, so a stale id can only
/// fail with [`ViewKitError::UnknownNode`](crate::ViewKitError::UnknownNode).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registration handle returned by listener-adding calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Handle to a pending document timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Identity of a view port (stack or selector).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortId(pub u64);

/// Identity of a view handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(pub u64);

static NEXT_PORT: AtomicU64 = AtomicU64::new(1);
static NEXT_VIEW: AtomicU64 = AtomicU64::new(1);

impl PortId {
    pub(crate) fn next() -> Self {
        Self(NEXT_PORT.fetch_add(1, Ordering::Relaxed))
    }
}

impl ViewId {
    pub(crate) fn next() -> Self {
        Self(NEXT_VIEW.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for PortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "port-{}", self.0)
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

/// Validate a duration-like value in seconds (finite and `>= 0`).
pub(crate) fn validate_secs(field: &str, v: f64) -> crate::ViewKitResult<f64> {
    if !v.is_finite() || v < 0.0 {
        return Err(crate::ViewKitError::validation(format!(
            "{field} must be finite and >= 0"
        )));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
