use super::*;
use crate::animation::ease::Ease;
use crate::transition::runner::Watchdog;

#[test]
fn parse_transition_accepts_kinds_and_aliases() {
    for (kind, name) in [
        ("slide", "slide"),
        ("Fade", "fade"),
        (" crossfade ", "fade"),
        ("none", "instant"),
        ("INSTANT", "instant"),
    ] {
        let t = parse_transition(&TransitionSpec::new(kind)).unwrap();
        assert_eq!(t.name(), name, "kind {kind:?}");
    }
    assert!(parse_transition(&TransitionSpec::new("none")).unwrap().timing().is_none());
}

#[test]
fn parse_transition_rejects_unknown_or_empty_kinds() {
    assert!(matches!(
        parse_transition(&TransitionSpec::new("zoom")),
        Err(ViewKitError::Validation(_))
    ));
    assert!(matches!(
        parse_transition(&TransitionSpec::new("  ")),
        Err(ViewKitError::Validation(_))
    ));
}

#[test]
fn json_overrides_are_flattened_next_to_the_kind() {
    let spec = TransitionSpec::from_json(
        r#"{ "kind": "slide", "reverse": true, "duration": 0.5, "easing": "ease-in-out", "watchdog": "disabled" }"#,
    )
    .unwrap();
    assert_eq!(spec.kind, "slide");
    assert!(spec.options.reverse);

    let t = parse_transition(&spec).unwrap();
    let timing = t.timing().unwrap();
    assert!(t.reverse());
    assert_eq!(timing.duration, 0.5);
    assert_eq!(timing.easing, Ease::EaseInOut);
    assert_eq!(t.watchdog(), Watchdog::Disabled);
}

#[test]
fn invalid_numbers_and_malformed_json_are_errors() {
    let spec = TransitionSpec::from_json(r#"{ "kind": "fade", "delay": -0.1 }"#).unwrap();
    assert!(matches!(
        parse_transition(&spec),
        Err(ViewKitError::Validation(_))
    ));
    assert!(matches!(
        TransitionSpec::from_json(r#"{ "reverse": true }"#),
        Err(ViewKitError::Serde(_))
    ));
}

#[test]
fn stack_transitions_resolve_per_operation() {
    let spec = StackTransitionsSpec::from_json(
        r#"{ "push": { "kind": "slide" }, "pop": { "kind": "slide", "reverse": true } }"#,
    )
    .unwrap();
    let resolved = spec.resolve().unwrap();
    assert!(!resolved.push.as_ref().unwrap().reverse());
    assert!(resolved.pop.as_ref().unwrap().reverse());
    assert!(resolved.replace.is_none());

    let bad = StackTransitionsSpec {
        replace: Some(TransitionSpec::new("warp")),
        ..StackTransitionsSpec::default()
    };
    assert!(bad.resolve().is_err());
}
