//! ViewKit is a small view-composition layer: it decides which view subtree is
//! mounted inside a container and animates the handoff between the outgoing and
//! the incoming view.
//!
//! - A [`Document`] is a headless element tree with a manual clock
//! - A [`Transition`] runs a [`Choreography`] ([`Slide`], [`Fade`], ...) between two elements
//! - A [`ViewStack`] (push/pop/replace) or a [`ViewSelector`] (indexed) mounts [`ViewHandle`]s
//!
//! Everything is single-threaded. Navigation calls return once the animation is
//! scheduled; completions fire while the document clock advances.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
/// Headless document model.
pub mod dom;
/// Transitions and their configuration.
pub mod transition;
/// Views, view ports, stacks and selectors.
pub mod view;

pub use crate::foundation::core::{ListenerId, NodeId, PortId, Size, TimerId, Vec2, ViewId};
pub use crate::foundation::error::{ViewKitError, ViewKitResult};
pub use crate::foundation::events::Emitter;

pub use crate::animation::ease::Ease;
pub use crate::animation::latch::CompletionBarrier;
pub use crate::dom::document::{Document, TransitionEnd, TransitionEndCallback};
pub use crate::dom::style::{Property, TransitionTiming, Value};
pub use crate::transition::fade::Fade;
pub use crate::transition::runner::{
    Choreography, Handoff, NoOp, Transition, TransitionEvent, TransitionOptions, Watchdog,
};
pub use crate::transition::slide::Slide;
pub use crate::transition::spec::{
    StackTransitionsSpec, TransitionSpec, parse_transition, parse_transition_kind,
};
pub use crate::view::handle::{Lifecycle, View, ViewHandle};
pub use crate::view::port::{RenderOutcome, Selection, ViewPort};
pub use crate::view::selector::{IndexSelection, SelectorEvent, ViewSelector};
pub use crate::view::stack::{StackEvent, StackSelection, StackTransitions, ViewStack};
