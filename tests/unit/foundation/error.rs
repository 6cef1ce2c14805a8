use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ViewKitError::invalid_operation("x")
            .to_string()
            .contains("invalid operation:")
    );
    assert!(
        ViewKitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ViewKitError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(
        ViewKitError::out_of_range(2, 2).to_string(),
        "index 2 out of range (len 2)"
    );
    assert_eq!(
        ViewKitError::UnknownNode(NodeId(7)).to_string(),
        "unknown node #7"
    );
}

#[test]
fn timeout_reports_pending_elements() {
    let err = ViewKitError::TransitionTimeout {
        transition: "fade",
        elapsed_s: 1.4,
        pending: 1,
    };
    let s = err.to_string();
    assert!(s.contains("'fade'"));
    assert!(s.contains("1.400s"));
    assert!(s.contains("1 element(s)"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ViewKitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: ViewKitError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ViewKitError::Serde(_)));
}
