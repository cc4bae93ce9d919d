use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CaptionError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CaptionError::alignment("x")
            .to_string()
            .contains("alignment error:")
    );
    assert!(CaptionError::layout("x").to_string().contains("layout error:"));
    assert!(CaptionError::render("x").to_string().contains("render error:"));
    assert!(CaptionError::asset("x").to_string().contains("asset error:"));
    assert!(
        CaptionError::collaborator("x")
            .to_string()
            .contains("collaborator error:")
    );
    assert!(
        CaptionError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CaptionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
