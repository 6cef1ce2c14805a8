use crate::{
    animation::ease::Ease,
    dom::style::{Property, Value},
    foundation::core::NodeId,
};

#[derive(Clone, Debug)]
pub(crate) struct RunningAnimation {
    pub node: NodeId,
    pub property: Property,
    pub from: Value,
    pub to: Value,
    /// Clock time the interpolation starts (after the declared delay).
    pub begin: f64,
    pub duration: f64,
    pub easing: Ease,
    pub seq: u64,
}

impl RunningAnimation {
    pub fn end(&self) -> f64 {
        self.begin + self.duration
    }

    pub fn value_at(&self, now: f64) -> Value {
        if now <= self.begin {
            return self.from.clone();
        }
        let t = ((now - self.begin) / self.duration).clamp(0.0, 1.0);
        self.from
            .lerp(&self.to, self.easing.apply(t))
            .unwrap_or_else(|| self.to.clone())
    }
}

/// Property animations currently in flight, at most one per `(node, property)`.
#[derive(Debug, Default)]
pub(crate) struct Animator {
    running: Vec<RunningAnimation>,
    next_seq: u64,
}

impl Animator {
    pub fn start(&mut self, mut anim: RunningAnimation) {
        self.cancel(anim.node, anim.property);
        anim.seq = self.next_seq;
        self.next_seq += 1;
        self.running.push(anim);
    }

    pub fn get(&self, node: NodeId, property: Property) -> Option<&RunningAnimation> {
        self.running
            .iter()
            .find(|a| a.node == node && a.property == property)
    }

    pub fn cancel(&mut self, node: NodeId, property: Property) -> bool {
        let before = self.running.len();
        self.running
            .retain(|a| !(a.node == node && a.property == property));
        self.running.len() != before
    }

    pub fn cancel_where(&mut self, mut pred: impl FnMut(&RunningAnimation) -> bool) -> usize {
        let before = self.running.len();
        self.running.retain(|a| !pred(a));
        before - self.running.len()
    }

    pub fn next_end(&self) -> Option<f64> {
        self.running.iter().map(RunningAnimation::end).reduce(f64::min)
    }

    /// Remove every animation that has ended by `now`, oldest end first.
    pub fn take_finished(&mut self, now: f64) -> Vec<RunningAnimation> {
        let (mut done, keep): (Vec<_>, Vec<_>) = std::mem::take(&mut self.running)
            .into_iter()
            .partition(|a| a.end() <= now);
        self.running = keep;
        done.sort_by(|a, b| a.end().total_cmp(&b.end()).then(a.seq.cmp(&b.seq)));
        done
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}
