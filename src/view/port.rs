use std::{cell::RefCell, rc::Rc};

use crate::{
    dom::document::Document,
    foundation::core::{ListenerId, NodeId, PortId},
    foundation::error::ViewKitResult,
    foundation::events::Emitter,
    transition::runner::Transition,
    view::handle::{Lifecycle, ViewHandle},
};

/// Selection policy of a [`ViewPort`]: which view should be visible.
pub trait Selection {
    /// Port-level notification type.
    type Event;

    /// The view that should be mounted, if any.
    fn current(&self) -> Option<&ViewHandle>;
}

/// What a [`ViewPort::render`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The desired view was already mounted.
    Unchanged,
    /// A different view was mounted.
    Swapped {
        /// The outgoing view is detached when the transition completes.
        animated: bool,
    },
    /// Nothing is selected; the mount point was emptied.
    Cleared,
}

/// Mount point that shows exactly one logical view at a time.
///
/// The port writes into `mount` but does not own it. Navigation goes through
/// the selection-specific wrappers ([`ViewStack`](crate::ViewStack),
/// [`ViewSelector`](crate::ViewSelector)), which mutate the selection and
/// then reconcile.
pub struct ViewPort<S: Selection> {
    pub(crate) id: PortId,
    pub(crate) mount: NodeId,
    pub(crate) selection: S,
    pub(crate) events: Emitter<S::Event>,
    // Shared with deferred detaches so they can tell a remounted view apart.
    mounted: Rc<RefCell<Option<ViewHandle>>>,
}

impl<S: Selection> std::fmt::Debug for ViewPort<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewPort")
            .field("id", &self.id)
            .field("mount", &self.mount)
            .field("mounted", &self.current_view().map(|v| v.id()))
            .finish()
    }
}

impl<S: Selection> ViewPort<S> {
    pub(crate) fn with_selection(mount: NodeId, selection: S) -> Self {
        Self {
            id: PortId::next(),
            mount,
            selection,
            events: Emitter::new(),
            mounted: Rc::new(RefCell::new(None)),
        }
    }

    /// Identity used in back-references and lifecycle notifications.
    pub fn id(&self) -> PortId {
        self.id
    }

    /// Element the port mounts views into.
    pub fn mount(&self) -> NodeId {
        self.mount
    }

    /// The view the selection designates (may differ from the mounted one until rendered).
    pub fn get_view(&self) -> Option<&ViewHandle> {
        self.selection.current()
    }

    /// The view currently mounted.
    pub fn current_view(&self) -> Option<ViewHandle> {
        self.mounted.borrow().clone()
    }

    /// Port notification channel.
    pub fn events(&self) -> &Emitter<S::Event> {
        &self.events
    }

    /// Subscribe to port notifications.
    pub fn on(&self, f: impl FnMut(&S::Event) + 'static) -> ListenerId {
        self.events.on(f)
    }

    /// Unsubscribe from port notifications.
    pub fn off(&self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Reconcile the mount point with the selection.
    ///
    /// When a transition hook fails, the swap still completes (the new view is
    /// mounted and receives `InView`) before the error is returned.
    pub fn render(
        &mut self,
        doc: &mut Document,
        transition: Option<&Transition>,
    ) -> ViewKitResult<RenderOutcome> {
        self.reconcile(doc, transition, |_| {})
    }

    /// Reconcile, then call `on_settled` once the outgoing view is gone: after
    /// the animated handoff completes, or before returning when nothing animates.
    pub(crate) fn reconcile(
        &mut self,
        doc: &mut Document,
        transition: Option<&Transition>,
        on_settled: impl FnOnce(&mut Document) + 'static,
    ) -> ViewKitResult<RenderOutcome> {
        let desired = self.selection.current().cloned();
        let current = self.current_view();

        if desired == current {
            on_settled(doc);
            return Ok(RenderOutcome::Unchanged);
        }

        if let Some(old) = &current {
            old.notify(doc, Lifecycle::OutView { port: self.id });
        }

        let Some(view) = desired else {
            if let Some(old) = &current {
                detach_root(doc, old)?;
            }
            doc.empty(self.mount)?;
            *self.mounted.borrow_mut() = None;
            tracing::debug!(port = %self.id, "port cleared");
            on_settled(doc);
            return Ok(RenderOutcome::Cleared);
        };

        if transition.is_some_and(Transition::reverse) {
            doc.prepend_child(self.mount, view.root())?;
        } else {
            doc.append_child(self.mount, view.root())?;
        }
        *self.mounted.borrow_mut() = Some(view.clone());

        // A failed handoff has already been force-completed by the runner, so the
        // swap is finished either way; the error surfaces after `InView`.
        let (animated, handoff) = match (current, transition) {
            (Some(old), Some(transition)) if can_animate(doc, &old) => {
                let mounted = Rc::clone(&self.mounted);
                let from = old.root();
                let handoff = transition.run(doc, from, view.root(), move |doc| {
                    let remounted = mounted.borrow().as_ref() == Some(&old);
                    if !remounted && let Err(err) = detach_root(doc, &old) {
                        tracing::warn!(error = %err, view = %old.id(), "deferred detach failed");
                    }
                    on_settled(doc);
                });
                (true, handoff)
            }
            (Some(old), _) => {
                detach_root(doc, &old)?;
                on_settled(doc);
                (false, Ok(()))
            }
            (None, _) => {
                on_settled(doc);
                (false, Ok(()))
            }
        };

        tracing::debug!(port = %self.id, view = %view.id(), animated, "port swapped");
        view.notify(doc, Lifecycle::InView { port: self.id });
        handoff.map(|()| RenderOutcome::Swapped { animated })
    }
}

// A destroyed or already detached outgoing view would never signal completion.
fn can_animate(doc: &Document, old: &ViewHandle) -> bool {
    !old.is_destroyed() && doc.is_attached(old.root())
}

fn detach_root(doc: &mut Document, view: &ViewHandle) -> ViewKitResult<()> {
    if doc.contains(view.root()) {
        doc.detach(view.root())?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/view/port.rs"]
mod tests;
