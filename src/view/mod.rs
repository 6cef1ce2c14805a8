//! Views and the ports that mount them.

/// Application views and their shared handles.
pub mod handle;
/// The generic mount/swap primitive.
pub mod port;
/// Indexed (tab-style) selection.
pub mod selector;
/// Stack (drill-down) selection.
pub mod stack;
