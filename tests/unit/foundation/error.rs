use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        UnboxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        UnboxError::acquisition("x")
            .to_string()
            .contains("acquisition error:")
    );
    assert!(UnboxError::render("x").to_string().contains("render error:"));
    assert!(
        UnboxError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = UnboxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
