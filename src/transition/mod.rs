//! Animated handoffs between an outgoing and an incoming element.
//!
//! A [`Choreography`](runner::Choreography) only styles elements; the
//! [`Transition`](runner::Transition) runner owns timing declarations,
//! completion tracking and the watchdog.

/// Cross-fade choreography.
pub mod fade;
/// Choreography trait, run loop and transition events.
pub mod runner;
/// Horizontal slide choreography with a dimming overlay.
pub mod slide;
/// Serialized transition configuration.
pub mod spec;
