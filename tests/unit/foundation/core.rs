use super::*;

#[test]
fn ids_are_unique_and_increasing() {
    let a = PortId::next();
    let b = PortId::next();
    assert!(b > a);

    let v1 = ViewId::next();
    let v2 = ViewId::next();
    assert_ne!(v1, v2);
}

#[test]
fn display_formats() {
    assert_eq!(NodeId(3).to_string(), "#3");
    assert_eq!(PortId(4).to_string(), "port-4");
    assert_eq!(ViewId(5).to_string(), "view-5");
}

#[test]
fn validate_secs_rejects_negative_and_nan() {
    assert_eq!(validate_secs("duration", 0.0).unwrap(), 0.0);
    assert_eq!(validate_secs("duration", 0.3).unwrap(), 0.3);
    assert!(validate_secs("duration", -0.1).is_err());
    assert!(validate_secs("delay", f64::NAN).is_err());
    assert!(validate_secs("delay", f64::INFINITY).is_err());
}
