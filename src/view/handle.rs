use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    dom::document::Document,
    foundation::core::{ListenerId, NodeId, PortId, ViewId},
    foundation::error::ViewKitResult,
    foundation::events::Emitter,
};

/// Per-view notifications sent by the port that mounts it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// The view became the port's active view. Sent right after its root is
    /// attached, not when the transition finishes.
    InView {
        /// Port that mounted the view.
        port: PortId,
    },
    /// The view stops being the port's active view. Sent before any tree mutation.
    OutView {
        /// Port that is unmounting the view.
        port: PortId,
    },
}

/// Application-owned renderable unit.
///
/// The root element must stay stable for the lifetime of the view; ports detach
/// and reattach it freely, so it must not lose state on detach.
pub trait View {
    /// Element mounted into a port.
    fn root(&self) -> NodeId;

    /// Render or refresh content. Called by view stacks after attachment.
    fn render(&mut self, _doc: &mut Document) -> ViewKitResult<()> {
        Ok(())
    }

    /// React to a lifecycle notification (persist scroll state, pause media, ...).
    fn lifecycle(&mut self, _doc: &mut Document, _event: &Lifecycle) {}

    /// Release every resource and detach permanently. Defaults to freeing the root subtree.
    fn destroy(&mut self, doc: &mut Document) -> ViewKitResult<()> {
        let root = self.root();
        if doc.contains(root) {
            doc.remove(root)?;
        }
        Ok(())
    }
}

struct ViewCell {
    id: ViewId,
    root: NodeId,
    view: RefCell<Box<dyn View>>,
    owning_stack: Cell<Option<PortId>>,
    owning_selector: Cell<Option<PortId>>,
    stack_epoch: Cell<u64>,
    lifecycle: Emitter<Lifecycle>,
    destroyed: Cell<bool>,
}

/// Shared, identity-compared handle to a [`View`].
///
/// Ports hold clones of the handle. The back-references are lookup
/// relations maintained by the containers and never keep anything alive.
#[derive(Clone)]
pub struct ViewHandle {
    inner: Rc<ViewCell>,
}

impl PartialEq for ViewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for ViewHandle {}

impl std::fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewHandle")
            .field("id", &self.inner.id)
            .field("root", &self.inner.root)
            .field("owning_stack", &self.inner.owning_stack.get())
            .field("owning_selector", &self.inner.owning_selector.get())
            .field("destroyed", &self.inner.destroyed.get())
            .finish()
    }
}

impl ViewHandle {
    /// Wrap an application view.
    pub fn new(view: impl View + 'static) -> Self {
        let root = view.root();
        Self {
            inner: Rc::new(ViewCell {
                id: ViewId::next(),
                root,
                view: RefCell::new(Box::new(view)),
                owning_stack: Cell::new(None),
                owning_selector: Cell::new(None),
                stack_epoch: Cell::new(0),
                lifecycle: Emitter::new(),
                destroyed: Cell::new(false),
            }),
        }
    }

    /// Identity of the view.
    pub fn id(&self) -> ViewId {
        self.inner.id
    }

    /// Root element, captured at construction.
    pub fn root(&self) -> NodeId {
        self.inner.root
    }

    /// Stack the view was pushed onto, if it is still held by one.
    pub fn owning_stack(&self) -> Option<PortId> {
        self.inner.owning_stack.get()
    }

    /// Selector holding the view, if any.
    pub fn owning_selector(&self) -> Option<PortId> {
        self.inner.owning_selector.get()
    }

    /// `true` once [`destroy`](Self::destroy) ran.
    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.get()
    }

    /// Subscribe to lifecycle notifications.
    pub fn on_lifecycle(&self, f: impl FnMut(&Lifecycle) + 'static) -> ListenerId {
        self.inner.lifecycle.on(f)
    }

    /// Unsubscribe from lifecycle notifications.
    pub fn off_lifecycle(&self, id: ListenerId) -> bool {
        self.inner.lifecycle.off(id)
    }

    /// Borrow the wrapped view.
    pub fn with<R>(&self, f: impl FnOnce(&dyn View) -> R) -> R {
        f(&**self.inner.view.borrow())
    }

    /// Mutably borrow the wrapped view.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut dyn View) -> R) -> R {
        f(&mut **self.inner.view.borrow_mut())
    }

    /// Run the view's own render step.
    pub fn render(&self, doc: &mut Document) -> ViewKitResult<()> {
        self.inner.view.borrow_mut().render(doc)
    }

    /// Destroy the view. Later calls are no-ops.
    pub fn destroy(&self, doc: &mut Document) -> ViewKitResult<()> {
        if self.inner.destroyed.replace(true) {
            return Ok(());
        }
        tracing::debug!(view = %self.id(), "destroy view");
        self.inner.view.borrow_mut().destroy(doc)
    }

    pub(crate) fn notify(&self, doc: &mut Document, event: Lifecycle) {
        self.inner.view.borrow_mut().lifecycle(doc, &event);
        self.inner.lifecycle.emit(&event);
    }

    pub(crate) fn set_owning_stack(&self, port: Option<PortId>) {
        if port.is_some() {
            self.inner.stack_epoch.set(self.inner.stack_epoch.get() + 1);
        }
        self.inner.owning_stack.set(port);
    }

    // Bumped on every insertion into a stack.
    pub(crate) fn stack_epoch(&self) -> u64 {
        self.inner.stack_epoch.get()
    }

    pub(crate) fn set_owning_selector(&self, port: Option<PortId>) {
        self.inner.owning_selector.set(port);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/handle.rs"]
mod tests;
