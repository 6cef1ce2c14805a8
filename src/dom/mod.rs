//! Headless element tree with inline styles, CSS-like property transitions and
//! a manually driven clock.

pub(crate) mod animator;
/// The element tree, listeners, timers and clock.
pub mod document;
/// Style properties, values and declared transition timings.
pub mod style;
