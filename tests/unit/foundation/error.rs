use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PicframeError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        PicframeError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        PicframeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PicframeError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PicframeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_decode());
}

#[test]
fn is_decode_only_matches_decode() {
    assert!(PicframeError::decode("bad bytes").is_decode());
    assert!(!PicframeError::validation("bad bytes").is_decode());
}
