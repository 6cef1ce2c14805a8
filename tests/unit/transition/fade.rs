use super::*;
use crate::foundation::core::{NodeId, Size};

fn setup() -> (Document, NodeId, NodeId) {
    let mut d = Document::new(Size::new(320.0, 480.0));
    let root = d.root();
    let a = d.create_element("a");
    let b = d.create_element("b");
    d.append_child(root, a).unwrap();
    d.append_child(root, b).unwrap();
    (d, a, b)
}

fn handoff(from: NodeId, to: NodeId) -> Handoff {
    Handoff {
        from,
        to,
        reverse: false,
        timing: Fade.timing(),
    }
}

#[test]
fn default_timing_fades_opacity() {
    let timing = Fade.timing().unwrap();
    assert_eq!(timing.property, Property::Opacity);
    assert_eq!(timing.duration, FADE_DURATION_S);
    assert_eq!(timing.easing, Ease::EaseOut);
}

#[test]
fn hooks_swap_opacity_and_show_the_incoming_view() {
    let (mut d, a, b) = setup();
    d.set_style(b, Property::Display, Value::Keyword("none".into()))
        .unwrap();
    let h = handoff(a, b);

    Fade.before(&mut d, &h).unwrap();
    assert_eq!(d.style(b, Property::Opacity).unwrap(), Some(&Value::Number(0.0)));
    assert_eq!(d.style(a, Property::Opacity).unwrap(), Some(&Value::Number(1.0)));

    Fade.after(&mut d, &h).unwrap();
    assert_eq!(d.style(b, Property::Display).unwrap(), None);
    assert_eq!(d.style(b, Property::Opacity).unwrap(), Some(&Value::Number(1.0)));
    assert_eq!(d.style(a, Property::Opacity).unwrap(), Some(&Value::Number(0.0)));

    Fade.cleanup(&mut d, &h).unwrap();
    for node in [a, b] {
        assert_eq!(d.style(node, Property::Opacity).unwrap(), None);
        assert_eq!(d.style(node, Property::Display).unwrap(), None);
    }
}

#[test]
fn cleanup_tolerates_freed_elements() {
    let (mut d, a, b) = setup();
    let h = handoff(a, b);
    Fade.before(&mut d, &h).unwrap();
    d.remove(a).unwrap();
    Fade.cleanup(&mut d, &h).unwrap();
    assert_eq!(d.style(b, Property::Opacity).unwrap(), None);
}
