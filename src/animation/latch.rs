use std::cell::{Cell, RefCell};

use crate::foundation::core::NodeId;

/// Completion barrier for a two-element handoff.
///
/// Released once every expected node has signalled at least once, or when
/// forced. Whichever call releases it returns `true`; every other call
/// (duplicates, extra signals, foreign nodes, late forces) returns `false`.
#[derive(Debug)]
pub struct CompletionBarrier {
    pending: RefCell<Vec<NodeId>>,
    expected: usize,
    signals: Cell<u32>,
    released: Cell<bool>,
}

impl CompletionBarrier {
    /// Barrier waiting on each distinct node in `nodes`.
    pub fn new(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut pending: Vec<NodeId> = nodes.into_iter().collect();
        pending.sort();
        pending.dedup();
        Self {
            expected: pending.len(),
            pending: RefCell::new(pending),
            signals: Cell::new(0),
            released: Cell::new(false),
        }
    }

    /// Record a completion signal from `node`.
    pub fn signal(&self, node: NodeId) -> bool {
        self.signals.set(self.signals.get().saturating_add(1));
        if self.released.get() {
            return false;
        }
        let mut pending = self.pending.borrow_mut();
        let Some(pos) = pending.iter().position(|n| *n == node) else {
            return false;
        };
        pending.remove(pos);
        if pending.is_empty() {
            self.released.set(true);
            return true;
        }
        false
    }

    /// Release without waiting for the remaining signals.
    pub fn force(&self) -> bool {
        if self.released.get() {
            return false;
        }
        self.released.set(true);
        true
    }

    /// `true` once released by signals or by [`force`](Self::force).
    pub fn is_released(&self) -> bool {
        self.released.get()
    }

    /// Nodes that have not signalled yet.
    pub fn remaining(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Number of distinct nodes the barrier waits on.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Total signals observed, including duplicates and foreign nodes.
    pub fn signals_observed(&self) -> u32 {
        self.signals.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/latch.rs"]
mod tests;
