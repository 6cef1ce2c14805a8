use super::*;
use crate::dom::style::{Property, Value};
use crate::foundation::core::Size;
use crate::transition::fade::Fade;

// Declares an opacity timing but never changes a style, so completion only
// happens through manually dispatched signals or the watchdog.
struct Silent;

impl Choreography for Silent {
    fn name(&self) -> &'static str {
        "silent"
    }

    fn timing(&self) -> Option<TransitionTiming> {
        Some(TransitionTiming::new(Property::Opacity, 0.3, Ease::Linear))
    }
}

struct FailingBefore;

impl Choreography for FailingBefore {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn timing(&self) -> Option<TransitionTiming> {
        Some(TransitionTiming::new(Property::Opacity, 0.3, Ease::Linear))
    }

    fn before(&self, _doc: &mut Document, _h: &Handoff) -> ViewKitResult<()> {
        Err(ViewKitError::invalid_operation("boom"))
    }
}

fn setup() -> (Document, NodeId, NodeId) {
    let mut d = Document::new(Size::new(320.0, 480.0));
    let root = d.root();
    let a = d.create_element("a");
    let b = d.create_element("b");
    d.append_child(root, a).unwrap();
    d.append_child(root, b).unwrap();
    (d, a, b)
}

fn record(t: &Transition) -> Rc<RefCell<Vec<TransitionEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    t.on(move |ev| sink.borrow_mut().push(ev.clone()));
    log
}

fn counter() -> (Rc<Cell<u32>>, impl FnOnce(&mut Document) + 'static) {
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    (calls, move |_: &mut Document| c.set(c.get() + 1))
}

fn end(node: NodeId, property: Property) -> TransitionEnd {
    TransitionEnd {
        node,
        property,
        elapsed: 0.3,
    }
}

#[test]
fn instant_transition_completes_synchronously() {
    let (mut d, a, b) = setup();
    let t = Transition::instant();
    let log = record(&t);
    let (calls, done) = counter();

    t.run(&mut d, a, b, done).unwrap();
    assert_eq!(calls.get(), 1);
    assert_eq!(*log.borrow(), vec![TransitionEvent::Start, TransitionEvent::End]);
    assert_eq!(d.listener_count(a) + d.listener_count(b), 0);
    assert!(d.is_idle());
}

#[test]
fn fade_run_completes_once_after_both_elements_signal() {
    let (mut d, a, b) = setup();
    let t = Transition::fade();
    let log = record(&t);
    let (calls, done) = counter();

    t.run(&mut d, a, b, done).unwrap();
    assert_eq!(*log.borrow(), vec![TransitionEvent::Start]);
    assert!(d.is_animating(a, Property::Opacity));
    assert!(d.is_animating(b, Property::Opacity));
    assert_eq!(d.listener_count(a), 1);

    let elapsed = d.settle().unwrap();
    assert!((elapsed - 0.4).abs() < 1e-9);
    assert_eq!(calls.get(), 1);
    assert_eq!(*log.borrow(), vec![TransitionEvent::Start, TransitionEvent::End]);
    assert_eq!(d.listener_count(a) + d.listener_count(b), 0);
    assert!(d.transitions(a).unwrap().is_empty());
    assert_eq!(d.style(b, Property::Opacity).unwrap(), None);
}

#[test]
fn duplicate_and_foreign_signals_do_not_release() {
    let (mut d, a, b) = setup();
    let t = Transition::with_options(
        Silent,
        TransitionOptions {
            watchdog: Watchdog::Disabled,
            ..TransitionOptions::default()
        },
    )
    .unwrap();
    let (calls, done) = counter();
    t.run(&mut d, a, b, done).unwrap();

    d.dispatch_transition_end(end(a, Property::Opacity));
    d.dispatch_transition_end(end(a, Property::Opacity));
    d.dispatch_transition_end(end(b, Property::Left));
    assert_eq!(calls.get(), 0);

    d.dispatch_transition_end(end(b, Property::Opacity));
    assert_eq!(calls.get(), 1);

    assert_eq!(d.dispatch_transition_end(end(a, Property::Opacity)), 0);
    assert_eq!(d.dispatch_transition_end(end(b, Property::Opacity)), 0);
    assert_eq!(calls.get(), 1);
}

#[test]
fn watchdog_force_completes_a_stalled_run() {
    let (mut d, a, b) = setup();
    let t = Transition::with_options(
        Silent,
        TransitionOptions {
            watchdog: Watchdog::Grace(0.5),
            ..TransitionOptions::default()
        },
    )
    .unwrap();
    let log = record(&t);
    let (calls, done) = counter();
    t.run(&mut d, a, b, done).unwrap();
    assert_eq!(d.pending_timers(), 1);

    d.dispatch_transition_end(end(a, Property::Opacity));
    let elapsed = d.settle().unwrap();
    assert!((elapsed - 0.8).abs() < 1e-9);
    assert_eq!(calls.get(), 1);

    let events = log.borrow();
    assert_eq!(events.len(), 3);
    let TransitionEvent::TimedOut {
        transition,
        pending,
        ..
    } = events[1]
    else {
        panic!("expected a timeout, got {:?}", events[1]);
    };
    assert_eq!(transition, "silent");
    assert_eq!(pending, 1);
    assert!(matches!(
        events[1].as_error(),
        Some(ViewKitError::TransitionTimeout { pending: 1, .. })
    ));
    assert_eq!(events[2], TransitionEvent::End);
    assert_eq!(d.listener_count(a) + d.listener_count(b), 0);
}

#[test]
fn completion_clears_the_watchdog() {
    let (mut d, a, b) = setup();
    let t = Transition::with_options(Silent, TransitionOptions::default()).unwrap();
    let (calls, done) = counter();
    t.run(&mut d, a, b, done).unwrap();

    d.dispatch_transition_end(end(a, Property::Opacity));
    d.dispatch_transition_end(end(b, Property::Opacity));
    assert_eq!(calls.get(), 1);
    assert_eq!(d.pending_timers(), 0);
}

#[test]
fn failing_hook_force_completes_and_propagates() {
    let (mut d, a, b) = setup();
    let t = Transition::new(FailingBefore);
    let log = record(&t);
    let (calls, done) = counter();

    let err = t.run(&mut d, a, b, done).unwrap_err();
    assert!(matches!(err, ViewKitError::InvalidOperation(_)));
    assert_eq!(calls.get(), 1);
    assert_eq!(*log.borrow(), vec![TransitionEvent::Start, TransitionEvent::End]);
    assert!(d.is_idle());
}

#[test]
fn declared_timings_are_restored_after_the_run() {
    let (mut d, a, b) = setup();
    let own = TransitionTiming::new(Property::Left, 1.0, Ease::Linear);
    let stale = TransitionTiming::new(Property::Opacity, 2.0, Ease::Linear);
    d.set_transitions(a, vec![own, stale]).unwrap();

    let t = Transition::fade();
    t.run(&mut d, a, b, |_| {}).unwrap();
    let during = d.transitions(a).unwrap().to_vec();
    assert_eq!(during.len(), 2);
    assert_eq!(during[0], own);
    assert_eq!(during[1].duration, 0.4);

    d.settle().unwrap();
    assert_eq!(d.transitions(a).unwrap(), &[own, stale]);
    assert_eq!(d.computed_style(a, Property::Opacity).unwrap(), Value::Number(1.0));
}

#[test]
fn options_override_timing_and_validate() {
    let t = Transition::with_options(
        Fade,
        TransitionOptions {
            reverse: true,
            duration: Some(1.0),
            easing: Some(Ease::Linear),
            delay: Some(0.25),
            watchdog: Watchdog::Disabled,
        },
    )
    .unwrap();
    let timing = t.timing().unwrap();
    assert!(t.reverse());
    assert_eq!(timing.property, Property::Opacity);
    assert_eq!(timing.duration, 1.0);
    assert_eq!(timing.easing, Ease::Linear);
    assert_eq!(timing.delay, 0.25);
    assert_eq!(t.watchdog(), Watchdog::Disabled);

    let negative = TransitionOptions {
        duration: Some(-1.0),
        ..TransitionOptions::default()
    };
    assert!(matches!(
        Transition::with_options(Fade, negative),
        Err(ViewKitError::Validation(_))
    ));
    let zero_grace = TransitionOptions {
        watchdog: Watchdog::Grace(0.0),
        ..TransitionOptions::default()
    };
    assert!(Transition::with_options(Fade, zero_grace).is_err());
}

#[test]
fn clones_share_listeners() {
    let t = Transition::fade();
    let clone = t.clone();
    assert!(Transition::ptr_eq(&t, &clone));
    let log = record(&clone);

    let (mut d, a, b) = setup();
    t.run(&mut d, a, b, |_| {}).unwrap();
    assert_eq!(log.borrow().len(), 1);
    assert!(!Transition::ptr_eq(&t, &Transition::fade()));
}
