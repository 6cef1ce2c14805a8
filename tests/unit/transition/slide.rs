use super::*;
use crate::transition::runner::Transition;

fn setup() -> (Document, NodeId, NodeId, NodeId) {
    let mut d = Document::new(Size::new(800.0, 600.0));
    let root = d.root();
    let container = d.create_element("container");
    d.set_size(container, Size::new(300.0, 400.0)).unwrap();
    d.append_child(root, container).unwrap();
    let a = d.create_element("a");
    let b = d.create_element("b");
    d.append_child(container, a).unwrap();
    d.append_child(container, b).unwrap();
    (d, container, a, b)
}

fn handoff(slide: &Slide, from: NodeId, to: NodeId, reverse: bool) -> Handoff {
    Handoff {
        from,
        to,
        reverse,
        timing: slide.timing(),
    }
}

#[test]
fn default_timing_is_a_short_transform_ease_out() {
    let timing = Slide::default().timing().unwrap();
    assert_eq!(timing.property, Property::Transform);
    assert_eq!(timing.duration, SLIDE_DURATION_S);
    assert_eq!(timing.easing, Ease::EaseOut);
    assert_eq!(timing.delay, 0.0);
}

#[test]
fn forward_slide_positions_incoming_view_off_screen() {
    let (mut d, container, a, b) = setup();
    let slide = Slide::default();
    let h = handoff(&slide, a, b, false);

    slide.before(&mut d, &h).unwrap();
    assert_eq!(slide.active_overlays(), 1);
    let overlay = d.children(container).unwrap()[1];
    assert_eq!(d.children(container).unwrap(), &[a, overlay, b]);
    assert_eq!(d.width(overlay).unwrap(), 300.0);
    assert_eq!(d.height(overlay).unwrap(), 400.0);
    assert_eq!(d.style(b, Property::Left).unwrap(), Some(&Value::Px(300.0)));
    assert_eq!(d.style(a, Property::Left).unwrap(), Some(&Value::Px(0.0)));
    assert_eq!(
        d.computed_style(overlay, Property::Opacity).unwrap(),
        Value::Number(0.0)
    );

    slide.after(&mut d, &h).unwrap();
    assert_eq!(
        d.style(b, Property::Transform).unwrap(),
        Some(&Value::Translate(Vec2::new(-300.0, 0.0)))
    );
    assert_eq!(
        d.style(a, Property::Transform).unwrap(),
        Some(&Value::Translate(Vec2::new(-100.0, 0.0)))
    );
    assert!(d.is_animating(overlay, Property::Opacity));
}

#[test]
fn reverse_slide_uncovers_the_view_underneath() {
    let (mut d, container, a, b) = setup();
    let slide = Slide::default();
    let h = handoff(&slide, b, a, true);

    slide.before(&mut d, &h).unwrap();
    let overlay = d.children(container).unwrap()[1];
    assert_eq!(d.children(container).unwrap(), &[a, overlay, b]);
    assert_eq!(d.style(a, Property::Left).unwrap(), Some(&Value::Px(-100.0)));
    assert_eq!(
        d.style(b, Property::BackgroundColor).unwrap(),
        Some(&Value::Hsl {
            h: 0.0,
            s: 0.0,
            l: 100.0
        })
    );
    assert_eq!(
        d.computed_style(overlay, Property::Opacity).unwrap(),
        Value::Number(0.2)
    );

    slide.after(&mut d, &h).unwrap();
    assert_eq!(
        d.style(b, Property::Transform).unwrap(),
        Some(&Value::Translate(Vec2::new(300.0, 0.0)))
    );
    assert_eq!(
        d.style(a, Property::Transform).unwrap(),
        Some(&Value::Translate(Vec2::new(100.0, 0.0)))
    );
}

#[test]
fn cleanup_removes_overlay_and_inline_geometry() {
    let (mut d, container, a, b) = setup();
    let nodes = d.node_count();
    let slide = Slide::default();
    let h = handoff(&slide, a, b, false);
    slide.before(&mut d, &h).unwrap();
    slide.after(&mut d, &h).unwrap();

    slide.cleanup(&mut d, &h).unwrap();
    assert_eq!(slide.active_overlays(), 0);
    assert_eq!(d.node_count(), nodes);
    assert_eq!(d.children(container).unwrap(), &[a, b]);
    for node in [a, b] {
        assert_eq!(d.style(node, Property::Left).unwrap(), None);
        assert_eq!(d.style(node, Property::Transform).unwrap(), None);
        assert_eq!(d.style(node, Property::BackgroundColor).unwrap(), None);
    }
}

#[test]
fn full_run_leaves_no_trace() {
    let (mut d, container, a, b) = setup();
    let nodes = d.node_count();
    let t = Transition::slide();
    t.run(&mut d, a, b, |_| {}).unwrap();
    assert!(d.is_animating(a, Property::Transform));
    assert!(d.is_animating(b, Property::Transform));

    let elapsed = d.settle().unwrap();
    assert!((elapsed - SLIDE_DURATION_S).abs() < 1e-9);
    assert_eq!(d.node_count(), nodes);
    assert_eq!(d.children(container).unwrap(), &[a, b]);
    assert_eq!(
        d.computed_style(b, Property::Transform).unwrap(),
        Value::Translate(Vec2::ZERO)
    );
}
