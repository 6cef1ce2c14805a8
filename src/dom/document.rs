use std::{collections::BTreeMap, rc::Rc};

use crate::{
    dom::animator::{Animator, RunningAnimation},
    dom::style::{Property, TransitionTiming, Value},
    foundation::core::{ListenerId, NodeId, Size, TimerId, validate_secs},
    foundation::error::{ViewKitError, ViewKitResult},
};

const MAX_EVENTS_PER_ADVANCE: usize = 100_000;
const MAX_SETTLE_ROUNDS: usize = 10_000;

/// Completion signal for one animated property on one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionEnd {
    /// Element whose property finished animating.
    pub node: NodeId,
    /// The animated property.
    pub property: Property,
    /// Animation duration in seconds, excluding delay.
    pub elapsed: f64,
}

/// Callback invoked for [`TransitionEnd`] signals on a node.
pub type TransitionEndCallback = Rc<dyn Fn(&mut Document, &TransitionEnd)>;

type TimerCallback = Box<dyn FnOnce(&mut Document)>;

#[derive(Debug)]
struct Element {
    tag: String,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    style: BTreeMap<Property, Value>,
    transitions: Vec<TransitionTiming>,
    size: Option<Size>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            text: None,
            parent: None,
            children: Vec::new(),
            style: BTreeMap::new(),
            transitions: Vec::new(),
            size: None,
        }
    }
}

struct Listener {
    id: ListenerId,
    node: NodeId,
    callback: TransitionEndCallback,
}

struct Timer {
    id: TimerId,
    due: f64,
    callback: TimerCallback,
}

enum Next {
    Animation(f64),
    Timer(usize, f64),
}

enum Placement {
    Append(NodeId),
    Prepend(NodeId),
    After(NodeId),
}

/// Headless element tree with inline styles, CSS-like property transitions,
/// a manual clock and timers.
///
/// Everything is single-threaded: listeners and timers receive `&mut Document`
/// and run synchronously from [`advance`](Self::advance),
/// [`settle`](Self::settle) or [`dispatch_transition_end`](Self::dispatch_transition_end).
pub struct Document {
    nodes: Vec<Option<Element>>,
    root: NodeId,
    viewport: Size,
    now: f64,
    animator: Animator,
    listeners: Vec<Listener>,
    timers: Vec<Timer>,
    next_listener: u64,
    next_timer: u64,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.node_count())
            .field("now", &self.now)
            .field("animations", &self.animator.len())
            .field("timers", &self.timers.len())
            .finish()
    }
}

impl Document {
    /// Empty document whose root (`body`) fills `viewport`.
    pub fn new(viewport: Size) -> Self {
        let mut body = Element::new("body");
        body.size = Some(viewport);
        Self {
            nodes: vec![Some(body)],
            root: NodeId(0),
            viewport,
            now: 0.0,
            animator: Animator::default(),
            listeners: Vec::new(),
            timers: Vec::new(),
            next_listener: 1,
            next_timer: 1,
        }
    }

    /// Root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Viewport size the root element fills.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Current clock time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of live nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Some(Element::new(tag)));
        NodeId((self.nodes.len() - 1) as u32)
    }

    /// `true` if `node` has not been removed.
    pub fn contains(&self, node: NodeId) -> bool {
        self.el(node).is_ok()
    }

    /// Element tag name.
    pub fn tag(&self, node: NodeId) -> ViewKitResult<&str> {
        Ok(&self.el(node)?.tag)
    }

    /// Text content.
    pub fn text(&self, node: NodeId) -> ViewKitResult<Option<&str>> {
        Ok(self.el(node)?.text.as_deref())
    }

    /// Replace text content.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) -> ViewKitResult<()> {
        self.el_mut(node)?.text = Some(text.into());
        Ok(())
    }

    /// Parent element, `None` for the root and detached nodes.
    pub fn parent(&self, node: NodeId) -> ViewKitResult<Option<NodeId>> {
        Ok(self.el(node)?.parent)
    }

    /// Children in paint order (first child paints first).
    pub fn children(&self, node: NodeId) -> ViewKitResult<&[NodeId]> {
        Ok(&self.el(node)?.children)
    }

    /// `true` if `node` is connected to the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == self.root {
                return true;
            }
            cur = match self.el(id) {
                Ok(el) => el.parent,
                Err(_) => return false,
            };
        }
        false
    }

    /// Insert `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> ViewKitResult<()> {
        self.insert(child, Placement::Append(parent))
    }

    /// Insert `child` as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> ViewKitResult<()> {
        self.insert(child, Placement::Prepend(parent))
    }

    /// Insert `node` as the next sibling of `reference`.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> ViewKitResult<()> {
        self.insert(node, Placement::After(reference))
    }

    /// Detach `node` from its parent, keeping its subtree, styles and listeners.
    ///
    /// Animations in the detached subtree are cancelled without a completion signal.
    pub fn detach(&mut self, node: NodeId) -> ViewKitResult<()> {
        let parent = self.el(node)?.parent;
        if let Some(parent) = parent {
            self.el_mut(parent)?.children.retain(|c| *c != node);
            self.el_mut(node)?.parent = None;
            self.cancel_subtree_animations(node);
        }
        Ok(())
    }

    /// Detach and free `node` with its whole subtree and listeners.
    pub fn remove(&mut self, node: NodeId) -> ViewKitResult<()> {
        if node == self.root {
            return Err(ViewKitError::invalid_operation(
                "the document root cannot be removed",
            ));
        }
        self.detach(node)?;
        let doomed = self.subtree(node);
        for id in &doomed {
            self.nodes[id.0 as usize] = None;
        }
        self.listeners.retain(|l| !doomed.contains(&l.node));
        self.animator.cancel_where(|a| doomed.contains(&a.node));
        Ok(())
    }

    /// Detach every child of `node`.
    pub fn empty(&mut self, node: NodeId) -> ViewKitResult<()> {
        let children = std::mem::take(&mut self.el_mut(node)?.children);
        for child in children {
            self.el_mut(child)?.parent = None;
            self.cancel_subtree_animations(child);
        }
        Ok(())
    }

    /// Give `node` an explicit layout size.
    pub fn set_size(&mut self, node: NodeId, size: Size) -> ViewKitResult<()> {
        self.el_mut(node)?.size = Some(size);
        Ok(())
    }

    /// Resolved width: explicit size, else the nearest sized ancestor, else the viewport.
    pub fn width(&self, node: NodeId) -> ViewKitResult<f64> {
        Ok(self.resolved_size(node)?.width)
    }

    /// Resolved height, resolved like [`width`](Self::width).
    pub fn height(&self, node: NodeId) -> ViewKitResult<f64> {
        Ok(self.resolved_size(node)?.height)
    }

    /// Inline value of `property`, if set.
    pub fn style(&self, node: NodeId, property: Property) -> ViewKitResult<Option<&Value>> {
        Ok(self.el(node)?.style.get(&property))
    }

    /// Live value: animated value while animating, else inline, else initial.
    pub fn computed_style(&self, node: NodeId, property: Property) -> ViewKitResult<Value> {
        let el = self.el(node)?;
        if let Some(anim) = self.animator.get(node, property) {
            return Ok(anim.value_at(self.now));
        }
        Ok(el
            .style
            .get(&property)
            .cloned()
            .unwrap_or_else(|| property.initial()))
    }

    /// Set an inline value, animating it when a matching transition is declared.
    ///
    /// An animation starts only if the element is attached, the declared
    /// duration is positive, and the value differs from (and interpolates with)
    /// the current computed value. Otherwise the value applies at once.
    pub fn set_style(&mut self, node: NodeId, property: Property, value: Value) -> ViewKitResult<()> {
        let current = self.computed_style(node, property)?;
        let timing = self
            .el(node)?
            .transitions
            .iter()
            .rev()
            .find(|t| t.property == property)
            .copied();
        let attached = self.is_attached(node);
        self.el_mut(node)?.style.insert(property, value.clone());

        if self
            .animator
            .get(node, property)
            .is_some_and(|a| a.to == value)
        {
            return Ok(());
        }

        match timing {
            Some(t)
                if attached
                    && t.duration > 0.0
                    && current != value
                    && current.interpolable_with(&value) =>
            {
                self.animator.start(RunningAnimation {
                    node,
                    property,
                    from: current,
                    to: value,
                    begin: self.now + t.delay,
                    duration: t.duration,
                    easing: t.easing,
                    seq: 0,
                });
            }
            _ => {
                self.animator.cancel(node, property);
            }
        }
        Ok(())
    }

    /// Remove an inline value (no transition), cancelling any running animation.
    pub fn clear_style(&mut self, node: NodeId, property: Property) -> ViewKitResult<()> {
        self.el_mut(node)?.style.remove(&property);
        self.animator.cancel(node, property);
        Ok(())
    }

    /// Declared transitions of `node`.
    pub fn transitions(&self, node: NodeId) -> ViewKitResult<&[TransitionTiming]> {
        Ok(&self.el(node)?.transitions)
    }

    /// Replace the declared transitions of `node`.
    ///
    /// Running animations on properties no longer declared snap to their target.
    pub fn set_transitions(
        &mut self,
        node: NodeId,
        transitions: Vec<TransitionTiming>,
    ) -> ViewKitResult<()> {
        let el = self.el_mut(node)?;
        el.transitions = transitions;
        let declared: Vec<Property> = el.transitions.iter().map(|t| t.property).collect();
        self.animator
            .cancel_where(|a| a.node == node && !declared.contains(&a.property));
        Ok(())
    }

    /// `true` while `property` of `node` is animating.
    pub fn is_animating(&self, node: NodeId, property: Property) -> bool {
        self.animator.get(node, property).is_some()
    }

    /// Register a completion listener on `node`.
    pub fn add_transition_end_listener(
        &mut self,
        node: NodeId,
        callback: impl Fn(&mut Document, &TransitionEnd) + 'static,
    ) -> ViewKitResult<ListenerId> {
        self.el(node)?;
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            node,
            callback: Rc::new(callback),
        });
        Ok(id)
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Number of listeners registered on `node`.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.iter().filter(|l| l.node == node).count()
    }

    /// Deliver a completion signal to the listeners of `event.node`.
    ///
    /// Hosts driving real animations call this directly. Returns the number of
    /// listeners invoked.
    pub fn dispatch_transition_end(&mut self, event: TransitionEnd) -> usize {
        let snapshot: Vec<(ListenerId, TransitionEndCallback)> = self
            .listeners
            .iter()
            .filter(|l| l.node == event.node)
            .map(|l| (l.id, Rc::clone(&l.callback)))
            .collect();
        let mut invoked = 0;
        for (id, callback) in snapshot {
            if !self.listeners.iter().any(|l| l.id == id) {
                continue;
            }
            callback(self, &event);
            invoked += 1;
        }
        invoked
    }

    /// Run `callback` once `delay` seconds of document time have passed.
    pub fn set_timeout(
        &mut self,
        delay: f64,
        callback: impl FnOnce(&mut Document) + 'static,
    ) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self.timers.push(Timer {
            id,
            due: self.now + delay,
            callback: Box::new(callback),
        });
        id
    }

    /// Cancel a pending timer. Returns `false` if it already fired or never existed.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Number of pending timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of running property animations.
    pub fn running_animations(&self) -> usize {
        self.animator.len()
    }

    /// `true` when no animation or timer is pending.
    pub fn is_idle(&self) -> bool {
        self.animator.is_empty() && self.timers.is_empty()
    }

    /// Clock time of the next animation completion or timer.
    pub fn next_event_time(&self) -> Option<f64> {
        let timer = self.timers.iter().map(|t| t.due).reduce(f64::min);
        match (self.animator.next_end(), timer) {
            (Some(a), Some(t)) => Some(a.min(t)),
            (a, t) => a.or(t),
        }
    }

    /// Move the clock forward by `dt` seconds, firing completions and timers in
    /// chronological order. Returns the number of events processed.
    pub fn advance(&mut self, dt: f64) -> ViewKitResult<usize> {
        validate_secs("advance dt", dt)?;
        let target = self.now + dt;
        let mut processed = 0usize;

        loop {
            if processed > MAX_EVENTS_PER_ADVANCE {
                return Err(ViewKitError::invalid_operation(
                    "document event loop did not quiesce",
                ));
            }

            let next_anim = self.animator.next_end().filter(|t| *t <= target);
            let next_timer = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= target)
                .min_by(|(ia, a), (ib, b)| a.due.total_cmp(&b.due).then(ia.cmp(ib)))
                .map(|(i, t)| (i, t.due));

            let next = match (next_anim, next_timer) {
                (None, None) => break,
                (Some(end), Some((index, due))) => {
                    if end <= due {
                        Next::Animation(end)
                    } else {
                        Next::Timer(index, due)
                    }
                }
                (Some(end), None) => Next::Animation(end),
                (None, Some((index, due))) => Next::Timer(index, due),
            };

            match next {
                Next::Animation(end) => {
                    self.now = self.now.max(end);
                    for anim in self.animator.take_finished(self.now) {
                        processed += 1;
                        self.dispatch_transition_end(TransitionEnd {
                            node: anim.node,
                            property: anim.property,
                            elapsed: anim.duration,
                        });
                    }
                }
                Next::Timer(index, due) => {
                    let timer = self.timers.remove(index);
                    self.now = self.now.max(due);
                    processed += 1;
                    (timer.callback)(self);
                }
            }
        }

        self.now = self.now.max(target);
        Ok(processed)
    }

    /// Advance until no animation or timer is pending. Returns the elapsed time.
    pub fn settle(&mut self) -> ViewKitResult<f64> {
        let start = self.now;
        let mut rounds = 0;
        while let Some(t) = self.next_event_time() {
            if rounds >= MAX_SETTLE_ROUNDS {
                return Err(ViewKitError::invalid_operation(
                    "document did not settle",
                ));
            }
            self.advance((t - self.now).max(0.0))?;
            rounds += 1;
        }
        Ok(self.now - start)
    }

    /// Indented tag/text outline of the subtree under `node`.
    pub fn outline(&self, node: NodeId) -> ViewKitResult<String> {
        let mut out = String::new();
        self.outline_into(&mut out, node, 0)?;
        Ok(out)
    }

    fn outline_into(&self, out: &mut String, node: NodeId, depth: usize) -> ViewKitResult<()> {
        let el = self.el(node)?;
        out.push_str(&"  ".repeat(depth));
        out.push_str(&el.tag);
        if let Some(text) = &el.text {
            out.push_str(&format!(" \"{text}\""));
        }
        out.push('\n');
        for child in &el.children {
            self.outline_into(out, *child, depth + 1)?;
        }
        Ok(())
    }

    fn el(&self, node: NodeId) -> ViewKitResult<&Element> {
        self.nodes
            .get(node.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(ViewKitError::UnknownNode(node))
    }

    fn el_mut(&mut self, node: NodeId) -> ViewKitResult<&mut Element> {
        self.nodes
            .get_mut(node.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(ViewKitError::UnknownNode(node))
    }

    fn resolved_size(&self, node: NodeId) -> ViewKitResult<Size> {
        let mut cur = Some(node);
        while let Some(id) = cur {
            let el = self.el(id)?;
            if let Some(size) = el.size {
                return Ok(size);
            }
            cur = el.parent;
        }
        Ok(self.viewport)
    }

    fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut todo = vec![node];
        while let Some(id) = todo.pop() {
            if let Ok(el) = self.el(id) {
                out.push(id);
                todo.extend(el.children.iter().copied());
            }
        }
        out
    }

    fn cancel_subtree_animations(&mut self, node: NodeId) {
        let nodes = self.subtree(node);
        let cancelled = self.animator.cancel_where(|a| nodes.contains(&a.node));
        if cancelled > 0 {
            tracing::debug!(%node, cancelled, "cancelled animations on detached subtree");
        }
    }

    // `true` if `ancestor` is `node` or one of its ancestors.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.el(id).ok().and_then(|el| el.parent);
        }
        false
    }

    fn insert(&mut self, child: NodeId, placement: Placement) -> ViewKitResult<()> {
        self.el(child)?;
        let parent = match placement {
            Placement::Append(p) | Placement::Prepend(p) => p,
            Placement::After(reference) => {
                if reference == child {
                    return Err(ViewKitError::invalid_operation(
                        "cannot insert a node after itself",
                    ));
                }
                self.el(reference)?.parent.ok_or_else(|| {
                    ViewKitError::invalid_operation("reference node has no parent")
                })?
            }
        };
        self.el(parent)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(ViewKitError::invalid_operation(
                "cannot insert a node into its own subtree",
            ));
        }

        self.detach(child)?;
        let siblings = &mut self.el_mut(parent)?.children;
        let index = match placement {
            Placement::Append(_) => siblings.len(),
            Placement::Prepend(_) => 0,
            Placement::After(reference) => siblings
                .iter()
                .position(|c| *c == reference)
                .map_or(siblings.len(), |i| i + 1),
        };
        siblings.insert(index, child);
        self.el_mut(child)?.parent = Some(parent);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/document.rs"]
mod tests;
