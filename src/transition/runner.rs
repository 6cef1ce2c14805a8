use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    animation::{ease::Ease, latch::CompletionBarrier},
    dom::{
        document::{Document, TransitionEnd},
        style::TransitionTiming,
    },
    foundation::core::{ListenerId, NodeId, TimerId, validate_secs},
    foundation::error::{ViewKitError, ViewKitResult},
    foundation::events::Emitter,
};

/// Grace period added to `duration + delay` before the watchdog force-completes a run.
pub const DEFAULT_WATCHDOG_GRACE_S: f64 = 1.0;

/// The element pair a run animates between, plus the run's resolved parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handoff {
    /// Outgoing view root.
    pub from: NodeId,
    /// Incoming view root.
    pub to: NodeId,
    /// Mirror the choreography (navigating back).
    pub reverse: bool,
    /// Resolved timing, `None` for a no-op transition.
    pub timing: Option<TransitionTiming>,
}

/// The animated part of a transition: what to style before, during and after a handoff.
///
/// Implementations only describe styling. Completion tracking, timing
/// declarations, listener wiring and the watchdog are handled by [`Transition::run`].
pub trait Choreography {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Default animated property and timing. `None` makes the transition a
    /// synchronous no-op: `after` and `cleanup` run immediately.
    fn timing(&self) -> Option<TransitionTiming>;

    /// Position elements before any timing is applied.
    fn before(&self, _doc: &mut Document, _handoff: &Handoff) -> ViewKitResult<()> {
        Ok(())
    }

    /// Trigger the animated property changes.
    fn after(&self, _doc: &mut Document, _handoff: &Handoff) -> ViewKitResult<()> {
        Ok(())
    }

    /// Undo every style `before`/`after` applied.
    fn cleanup(&self, _doc: &mut Document, _handoff: &Handoff) -> ViewKitResult<()> {
        Ok(())
    }
}

/// Safeguard against completion signals that never arrive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Watchdog {
    /// Wait forever.
    Disabled,
    /// Force completion this many seconds after `duration + delay`.
    Grace(f64),
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::Grace(DEFAULT_WATCHDOG_GRACE_S)
    }
}

/// Per-instance overrides of a choreography's defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionOptions {
    /// Mirror the choreography and prepend the incoming view.
    #[serde(default)]
    pub reverse: bool,
    /// Duration override in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Easing override.
    #[serde(default)]
    pub easing: Option<Ease>,
    /// Delay override in seconds.
    #[serde(default)]
    pub delay: Option<f64>,
    /// Watchdog policy.
    #[serde(default)]
    pub watchdog: Watchdog,
}

impl TransitionOptions {
    /// Defaults with `reverse` set.
    pub fn reversed() -> Self {
        Self {
            reverse: true,
            ..Self::default()
        }
    }
}

/// Notifications emitted once per [`Transition::run`] (`TimedOut` only on watchdog expiry).
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionEvent {
    /// Run started, before `before`.
    Start,
    /// Run finished, after `cleanup` and before the completion callback.
    End,
    /// Watchdog force-completed the run; `End` follows.
    TimedOut {
        /// Choreography name.
        transition: &'static str,
        /// Seconds since the run started.
        elapsed_s: f64,
        /// Elements that never signalled.
        pending: usize,
    },
}

impl TransitionEvent {
    /// The [`ViewKitError::TransitionTimeout`] carried by a `TimedOut` event.
    pub fn as_error(&self) -> Option<ViewKitError> {
        match *self {
            Self::TimedOut {
                transition,
                elapsed_s,
                pending,
            } => Some(ViewKitError::TransitionTimeout {
                transition,
                elapsed_s,
                pending,
            }),
            _ => None,
        }
    }
}

struct TransitionInner {
    choreography: Box<dyn Choreography>,
    reverse: bool,
    timing: Option<TransitionTiming>,
    watchdog: Watchdog,
    events: Emitter<TransitionEvent>,
}

/// Shareable animated handoff strategy.
///
/// Cloning is cheap and clones share listeners. A transition can be reused for
/// any number of runs, including concurrent runs on different element pairs.
#[derive(Clone)]
pub struct Transition {
    inner: Rc<TransitionInner>,
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("name", &self.name())
            .field("reverse", &self.inner.reverse)
            .field("timing", &self.inner.timing)
            .field("watchdog", &self.inner.watchdog)
            .finish()
    }
}

impl Transition {
    /// Wrap `choreography` with its default timing.
    pub fn new(choreography: impl Choreography + 'static) -> Self {
        let timing = choreography.timing();
        Self::from_parts(Box::new(choreography), false, timing, Watchdog::default())
    }

    /// Wrap `choreography`, applying `options` on top of its default timing.
    pub fn with_options(
        choreography: impl Choreography + 'static,
        options: TransitionOptions,
    ) -> ViewKitResult<Self> {
        let timing = match choreography.timing() {
            None => None,
            Some(mut t) => {
                if let Some(d) = options.duration {
                    t.duration = d;
                }
                if let Some(e) = options.easing {
                    t.easing = e;
                }
                if let Some(d) = options.delay {
                    t.delay = d;
                }
                Some(t.validate()?)
            }
        };
        if let Watchdog::Grace(g) = options.watchdog
            && validate_secs("watchdog grace", g)? == 0.0
        {
            return Err(ViewKitError::validation("watchdog grace must be > 0"));
        }
        Ok(Self::from_parts(
            Box::new(choreography),
            options.reverse,
            timing,
            options.watchdog,
        ))
    }

    /// Default [`Slide`](crate::Slide).
    pub fn slide() -> Self {
        Self::new(crate::transition::slide::Slide::default())
    }

    /// Default [`Fade`](crate::Fade).
    pub fn fade() -> Self {
        Self::new(crate::transition::fade::Fade)
    }

    /// Synchronous no-op transition.
    pub fn instant() -> Self {
        Self::new(NoOp)
    }

    fn from_parts(
        choreography: Box<dyn Choreography>,
        reverse: bool,
        timing: Option<TransitionTiming>,
        watchdog: Watchdog,
    ) -> Self {
        Self {
            inner: Rc::new(TransitionInner {
                choreography,
                reverse,
                timing,
                watchdog,
                events: Emitter::new(),
            }),
        }
    }

    /// Choreography name.
    pub fn name(&self) -> &'static str {
        self.inner.choreography.name()
    }

    /// `true` when the incoming view is prepended and the choreography mirrored.
    pub fn reverse(&self) -> bool {
        self.inner.reverse
    }

    /// Resolved timing, `None` for no-op transitions.
    pub fn timing(&self) -> Option<TransitionTiming> {
        self.inner.timing
    }

    /// Watchdog policy.
    pub fn watchdog(&self) -> Watchdog {
        self.inner.watchdog
    }

    /// Event channel shared by all clones.
    pub fn events(&self) -> &Emitter<TransitionEvent> {
        &self.inner.events
    }

    /// Subscribe to run notifications.
    pub fn on(&self, f: impl FnMut(&TransitionEvent) + 'static) -> ListenerId {
        self.inner.events.on(f)
    }

    /// Unsubscribe.
    pub fn off(&self, id: ListenerId) -> bool {
        self.inner.events.off(id)
    }

    /// `true` if both handles share the same transition.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// Animate the handoff from `from` to `to`, then call `on_complete` exactly once.
    ///
    /// Emits `Start`, runs `before`, and for a no-op transition (no timing, or
    /// a zero duration) finishes synchronously. Otherwise it declares the
    /// timing on both elements, runs `after`, and completes after each element
    /// has signalled the animated property once (or the watchdog fires):
    /// timings restored, listeners removed, `cleanup`, `End`, then `on_complete`.
    ///
    /// A failing hook force-completes the run before the error is returned.
    #[tracing::instrument(skip(self, doc, on_complete), fields(transition = self.name()))]
    pub fn run(
        &self,
        doc: &mut Document,
        from: NodeId,
        to: NodeId,
        on_complete: impl FnOnce(&mut Document) + 'static,
    ) -> ViewKitResult<()> {
        let handoff = Handoff {
            from,
            to,
            reverse: self.inner.reverse,
            timing: self.inner.timing,
        };
        let on_complete: Completion = Box::new(on_complete);
        let run = Rc::new(Run {
            transition: self.clone(),
            handoff,
            barrier: CompletionBarrier::new([from, to]),
            on_complete: RefCell::new(Some(on_complete)),
            listeners: RefCell::new(Vec::new()),
            watchdog: Cell::new(None),
            saved_timings: RefCell::new(Vec::new()),
            started_at: doc.now(),
        });

        self.inner.events.emit(&TransitionEvent::Start);
        tracing::debug!(%from, %to, reverse = handoff.reverse, "transition start");

        if let Err(err) = self.inner.choreography.before(doc, &handoff) {
            run.force_complete(doc);
            return Err(err);
        }

        // A zero duration never produces completion signals.
        let Some(timing) = handoff.timing.filter(|t| t.duration > 0.0) else {
            let result = self.inner.choreography.after(doc, &handoff);
            run.force_complete(doc);
            return result;
        };

        let armed = run
            .arm(doc, timing)
            .and_then(|()| self.inner.choreography.after(doc, &handoff));
        if let Err(err) = armed {
            run.force_complete(doc);
            return Err(err);
        }
        Ok(())
    }
}

/// Choreography without animation; the handoff completes synchronously.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOp;

impl Choreography for NoOp {
    fn name(&self) -> &'static str {
        "instant"
    }

    fn timing(&self) -> Option<TransitionTiming> {
        None
    }
}

type Completion = Box<dyn FnOnce(&mut Document)>;

// State of one in-flight run, shared by its listeners and watchdog.
struct Run {
    transition: Transition,
    handoff: Handoff,
    barrier: CompletionBarrier,
    on_complete: RefCell<Option<Completion>>,
    listeners: RefCell<Vec<ListenerId>>,
    watchdog: Cell<Option<TimerId>>,
    saved_timings: RefCell<Vec<(NodeId, Vec<TransitionTiming>)>>,
    started_at: f64,
}

impl Run {
    fn arm(self: &Rc<Self>, doc: &mut Document, timing: TransitionTiming) -> ViewKitResult<()> {
        let Handoff { from, to, .. } = self.handoff;

        for node in [from, to] {
            let previous = doc.transitions(node)?.to_vec();
            let mut declared: Vec<TransitionTiming> = previous
                .iter()
                .copied()
                .filter(|t| t.property != timing.property)
                .collect();
            declared.push(timing);
            self.saved_timings.borrow_mut().push((node, previous));
            doc.set_transitions(node, declared)?;
        }

        for node in [from, to] {
            let run = Rc::clone(self);
            let id = doc.add_transition_end_listener(node, move |doc, ev| run.on_signal(doc, ev))?;
            self.listeners.borrow_mut().push(id);
        }

        if let Watchdog::Grace(grace) = self.transition.inner.watchdog {
            let run = Rc::clone(self);
            let id = doc.set_timeout(timing.total() + grace, move |doc| run.on_watchdog(doc));
            self.watchdog.set(Some(id));
        }
        Ok(())
    }

    fn on_signal(&self, doc: &mut Document, ev: &TransitionEnd) {
        let Some(timing) = self.handoff.timing else {
            return;
        };
        if ev.property != timing.property {
            return;
        }
        if self.barrier.signal(ev.node) {
            self.complete(doc);
        }
    }

    fn on_watchdog(&self, doc: &mut Document) {
        self.watchdog.set(None);
        if !self.barrier.force() {
            return;
        }
        let event = TransitionEvent::TimedOut {
            transition: self.transition.name(),
            elapsed_s: doc.now() - self.started_at,
            pending: self.barrier.remaining(),
        };
        if let Some(err) = event.as_error() {
            tracing::warn!(error = %err, "transition watchdog fired");
        }
        self.transition.inner.events.emit(&event);
        self.complete(doc);
    }

    fn force_complete(&self, doc: &mut Document) {
        if self.barrier.force() {
            self.complete(doc);
        }
    }

    // Reached exactly once per run: only the releasing barrier call leads here.
    fn complete(&self, doc: &mut Document) {
        for (node, timings) in self.saved_timings.borrow_mut().drain(..) {
            if doc.contains(node) {
                let _ = doc.set_transitions(node, timings);
            }
        }
        for id in self.listeners.borrow_mut().drain(..) {
            doc.remove_listener(id);
        }
        if let Some(id) = self.watchdog.take() {
            doc.clear_timeout(id);
        }

        if let Err(err) = self
            .transition
            .inner
            .choreography
            .cleanup(doc, &self.handoff)
        {
            tracing::warn!(error = %err, transition = self.transition.name(), "transition cleanup failed");
        }

        tracing::debug!(
            transition = self.transition.name(),
            signals = self.barrier.signals_observed(),
            "transition end"
        );
        self.transition.inner.events.emit(&TransitionEvent::End);

        let on_complete = self.on_complete.borrow_mut().take();
        if let Some(on_complete) = on_complete {
            on_complete(doc);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/runner.rs"]
mod tests;
