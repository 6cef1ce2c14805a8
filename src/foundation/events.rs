use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::foundation::core::ListenerId;

type Listener<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct Entry<E> {
    id: ListenerId,
    once: bool,
    listener: Listener<E>,
}

impl<E> Clone for Entry<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            once: self.once,
            listener: Rc::clone(&self.listener),
        }
    }
}

/// Typed single-threaded publish/subscribe channel.
///
/// Listeners run in registration order. A listener removed while an emission is
/// in progress is not invoked for the rest of that emission.
pub struct Emitter<E> {
    listeners: RefCell<Vec<Entry<E>>>,
    next_id: Cell<u64>,
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<E> Emitter<E> {
    /// Create an emitter without listeners.
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Subscribe `f` to every emitted event.
    pub fn on(&self, f: impl FnMut(&E) + 'static) -> ListenerId {
        self.register(false, Rc::new(RefCell::new(f)))
    }

    /// Subscribe `f` to the next emitted event only.
    pub fn once(&self, f: impl FnOnce(&E) + 'static) -> ListenerId
    where
        E: 'static,
    {
        let mut f = Some(f);
        self.register(
            true,
            Rc::new(RefCell::new(move |e: &E| {
                if let Some(f) = f.take() {
                    f(e);
                }
            })),
        )
    }

    /// Unsubscribe a listener. Returns `false` if `id` was not registered.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|e| e.id != id);
        listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver `event` to all listeners registered at the time of the call.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<Entry<E>> = self.listeners.borrow().clone();
        for entry in snapshot {
            if !self.is_registered(entry.id) {
                continue;
            }
            if entry.once {
                self.off(entry.id);
            }
            match entry.listener.try_borrow_mut() {
                Ok(mut f) => (f)(event),
                Err(_) => {
                    tracing::warn!(
                        listener = entry.id.0,
                        "skipping re-entrant listener invocation"
                    );
                }
            }
        }
    }

    fn register(&self, once: bool, listener: Listener<E>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Entry { id, once, listener });
        id
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|e| e.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/events.rs"]
mod tests;
