use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GridError::format("x")
            .to_string()
            .contains("snapshot format error:")
    );
    assert!(
        GridError::topology("x")
            .to_string()
            .contains("partition topology error:")
    );
    assert!(
        GridError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(GridError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn unknown_object_id_names_the_value() {
    assert_eq!(
        GridError::UnknownObjectId(7).to_string(),
        "unknown object id: 7"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GridError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
