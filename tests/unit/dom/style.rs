use super::*;

#[test]
fn lerp_numeric_values() {
    assert_eq!(
        Value::Px(0.0).lerp(&Value::Px(100.0), 0.25),
        Some(Value::Px(25.0))
    );
    assert_eq!(
        Value::Number(1.0).lerp(&Value::Number(0.0), 0.5),
        Some(Value::Number(0.5))
    );
    assert_eq!(
        Value::Translate(Vec2::ZERO).lerp(&Value::Translate(Vec2::new(-300.0, 0.0)), 0.5),
        Some(Value::Translate(Vec2::new(-150.0, 0.0)))
    );
}

#[test]
fn mismatched_or_keyword_values_are_discrete() {
    assert_eq!(Value::Px(0.0).lerp(&Value::Number(1.0), 0.5), None);
    let none = Value::Keyword("none".to_string());
    let block = Value::Keyword("block".to_string());
    assert!(!none.interpolable_with(&block));
}

#[test]
fn css_text_matches_browser_forms() {
    assert_eq!(Value::Px(12.5).css_text(), "12.5px");
    assert_eq!(
        Value::Translate(Vec2::new(-320.0, 0.0)).css_text(),
        "translate3d(-320px, 0px, 0)"
    );
    assert_eq!(
        Value::Hsl {
            h: 0.0,
            s: 0.0,
            l: 100.0
        }
        .css_text(),
        "hsl(0,0%,100%)"
    );
}

#[test]
fn timing_shorthand() {
    let t = TransitionTiming::new(Property::Transform, 0.3, Ease::EaseOut);
    assert_eq!(t.css_text(), "transform 0.3s ease-out 0s");
    assert_eq!(t.for_property(Property::Opacity).property, Property::Opacity);
    let delayed = TransitionTiming { delay: 0.1, ..t };
    assert!((delayed.total() - 0.4).abs() < 1e-12);
}

#[test]
fn timing_validation() {
    let t = TransitionTiming::new(Property::Opacity, 0.4, Ease::EaseOut);
    assert!(t.validate().is_ok());
    assert!(TransitionTiming { duration: -1.0, ..t }.validate().is_err());
    assert!(TransitionTiming { delay: f64::NAN, ..t }.validate().is_err());
}

#[test]
fn initial_values() {
    assert_eq!(Property::Opacity.initial(), Value::Number(1.0));
    assert_eq!(Property::Transform.initial(), Value::Translate(Vec2::ZERO));
    assert_eq!(Property::Left.initial().as_f64(), Some(0.0));
}
