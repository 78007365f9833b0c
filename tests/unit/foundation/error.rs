use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DevframeError::asset_missing("frames/phone.png", "not found")
            .to_string()
            .contains("asset missing:")
    );
    assert!(
        DevframeError::metadata("x")
            .to_string()
            .contains("metadata read error:")
    );
    assert!(
        DevframeError::composition("blend", "x")
            .to_string()
            .contains("composition error:")
    );
    assert!(
        DevframeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn asset_missing_names_the_path() {
    let err = DevframeError::asset_missing("frames/phone.png", "not found");
    let msg = err.to_string();
    assert!(msg.contains("frames/phone.png"));
    assert!(msg.contains("not found"));
}

#[test]
fn composition_keeps_its_cause() {
    use std::error::Error as _;

    let err = DevframeError::composition("resize frame", std::io::Error::other("boom"));
    let source = err.source().expect("composition error has a source");
    assert!(source.to_string().contains("boom"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DevframeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
