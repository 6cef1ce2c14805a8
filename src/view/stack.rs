use crate::{
    dom::document::Document,
    foundation::core::NodeId,
    foundation::error::{ViewKitError, ViewKitResult},
    foundation::lifo::Stack,
    transition::runner::Transition,
    view::handle::ViewHandle,
    view::port::{Selection, ViewPort},
};

/// Default transitions of a [`ViewStack`], one per navigation operation.
#[derive(Clone, Debug, Default)]
pub struct StackTransitions {
    /// Used by [`ViewStack::push_view`](ViewPort::push_view).
    pub push: Option<Transition>,
    /// Used by [`ViewStack::pop_view`](ViewPort::pop_view).
    pub pop: Option<Transition>,
    /// Used by [`ViewStack::replace_view`](ViewPort::replace_view).
    ///
    /// The replaced view is destroyed before the swap, so this transition never
    /// animates and emits no `Start`/`End`; it only decides whether the new view
    /// is prepended (`reverse`) or appended.
    pub replace: Option<Transition>,
}

/// Notifications emitted by a [`ViewStack`].
#[derive(Clone, Debug, PartialEq)]
pub enum StackEvent {
    /// A view was pushed.
    Pushed(ViewHandle),
    /// The top was popped (`None` when the stack was empty).
    Popped(Option<ViewHandle>),
    /// The top was replaced; follows `Popped` and `Pushed`.
    Replaced {
        /// New top.
        pushed: ViewHandle,
        /// Former top.
        popped: ViewHandle,
    },
}

/// LIFO selection: the top of the stack is the visible view.
#[derive(Debug, Default)]
pub struct StackSelection {
    stack: Stack<ViewHandle>,
    transitions: StackTransitions,
}

impl Selection for StackSelection {
    type Event = StackEvent;

    fn current(&self) -> Option<&ViewHandle> {
        self.stack.top()
    }
}

/// Drill-down navigation: push/pop/replace over a stack of views.
pub type ViewStack = ViewPort<StackSelection>;

impl ViewPort<StackSelection> {
    /// Empty stack mounting into `mount`, without default transitions.
    pub fn new(mount: NodeId) -> Self {
        Self::with_transitions(mount, StackTransitions::default())
    }

    /// Empty stack with per-operation default transitions.
    pub fn with_transitions(mount: NodeId, transitions: StackTransitions) -> Self {
        Self::with_selection(
            mount,
            StackSelection {
                stack: Stack::new(),
                transitions,
            },
        )
    }

    /// Default transitions.
    pub fn transitions(&self) -> &StackTransitions {
        &self.selection.transitions
    }

    /// Replace the default transitions.
    pub fn set_transitions(&mut self, transitions: StackTransitions) {
        self.selection.transitions = transitions;
    }

    /// Number of stacked views.
    pub fn len(&self) -> usize {
        self.selection.stack.len()
    }

    /// `true` when no view is stacked.
    pub fn is_empty(&self) -> bool {
        self.selection.stack.is_empty()
    }

    /// Stacked views, bottom first.
    pub fn views(&self) -> impl Iterator<Item = &ViewHandle> {
        self.selection.stack.iter()
    }

    /// Push `view` and make it visible.
    ///
    /// Uses `transition`, else the configured push transition. The port
    /// reconciles before the view's own render runs, then `Pushed` is emitted.
    /// A failing transition hook or render is reported after `Pushed`.
    #[tracing::instrument(skip_all, fields(port = %self.id, view = %view.id()))]
    pub fn push_view(
        &mut self,
        doc: &mut Document,
        view: ViewHandle,
        transition: Option<&Transition>,
    ) -> ViewKitResult<()> {
        let transition = transition.or(self.selection.transitions.push.as_ref()).cloned();

        view.set_owning_stack(Some(self.id));
        self.selection.stack.push(view.clone());
        let swapped = self.render(doc, transition.as_ref());
        let rendered = view.render(doc);
        self.events.emit(&StackEvent::Pushed(view));
        swapped?;
        rendered
    }

    /// Pop the top view and reveal the one below.
    ///
    /// `Popped` is emitted right away. The popped view loses its back-reference
    /// and is destroyed once the handoff completes, or before returning when
    /// nothing animates. A view still present deeper in the stack, or pushed
    /// again before the handoff completes, is left alone. Popping an empty
    /// stack returns `None`.
    #[tracing::instrument(skip_all, fields(port = %self.id))]
    pub fn pop_view(
        &mut self,
        doc: &mut Document,
        transition: Option<&Transition>,
    ) -> ViewKitResult<Option<ViewHandle>> {
        let transition = transition.or(self.selection.transitions.pop.as_ref()).cloned();
        let popped = self.selection.stack.pop();

        let doomed = popped
            .clone()
            .filter(|v| !self.selection.stack.iter().any(|other| other == v))
            .map(|v| {
                let epoch = v.stack_epoch();
                (v, epoch)
            });
        let swapped = self.reconcile(doc, transition.as_ref(), move |doc| {
            let Some((view, epoch)) = doomed else {
                return;
            };
            if view.stack_epoch() != epoch {
                return;
            }
            view.set_owning_stack(None);
            if let Err(err) = view.destroy(doc) {
                tracing::warn!(error = %err, view = %view.id(), "destroying popped view failed");
            }
        });

        self.events.emit(&StackEvent::Popped(popped.clone()));
        swapped?;
        Ok(popped)
    }

    /// Swap the top view for `view`, keeping the stack size.
    ///
    /// The former top loses its back-reference and is destroyed before
    /// reconciliation, so the swap never animates it; the replace transition
    /// still decides attach order. Emits `Popped`, `Pushed`, then `Replaced`.
    #[tracing::instrument(skip_all, fields(port = %self.id, view = %view.id()))]
    pub fn replace_view(
        &mut self,
        doc: &mut Document,
        view: ViewHandle,
        transition: Option<&Transition>,
    ) -> ViewKitResult<ViewHandle> {
        let transition = transition
            .or(self.selection.transitions.replace.as_ref())
            .cloned();
        let Some(popped) = self.selection.stack.pop() else {
            return Err(ViewKitError::invalid_operation("view stack is empty"));
        };

        let still_stacked = self.selection.stack.iter().any(|v| *v == popped);
        if !still_stacked && popped != view {
            popped.set_owning_stack(None);
            if let Err(err) = popped.destroy(doc) {
                tracing::warn!(error = %err, view = %popped.id(), "destroying replaced view failed");
            }
        }

        view.set_owning_stack(Some(self.id));
        self.selection.stack.push(view.clone());
        let swapped = self.render(doc, transition.as_ref());
        let rendered = view.render(doc);

        self.events.emit(&StackEvent::Popped(Some(popped.clone())));
        self.events.emit(&StackEvent::Pushed(view.clone()));
        self.events.emit(&StackEvent::Replaced {
            pushed: view,
            popped: popped.clone(),
        });
        swapped?;
        rendered?;
        Ok(popped)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/stack.rs"]
mod tests;
