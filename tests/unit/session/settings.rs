use std::io::Cursor;

use super::*;

#[test]
fn defaults_match_the_fixed_tool_behavior() {
    let s = SessionSettings::default();
    assert_eq!(s.overlay_path.as_deref(), Some(Path::new("eye.jpg")));
    assert_eq!(s.font_path, None);
    assert_eq!(s.export_file_name, "edited-image.png");
    assert_eq!(s.default_mode, DecorationMode::Banner);
    s.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let s = SessionSettings::from_reader(Cursor::new(r#"{ "default_mode": "frame" }"#)).unwrap();
    assert_eq!(s.default_mode, DecorationMode::Frame);
    assert_eq!(s.export_file_name, "edited-image.png");

    let s = SessionSettings::from_reader(Cursor::new(
        r#"{ "overlay_path": null, "font_path": "fonts/bold.ttf" }"#,
    ))
    .unwrap();
    assert_eq!(s.overlay_path, None);
    assert_eq!(s.font_path.as_deref(), Some(Path::new("fonts/bold.ttf")));
}

#[test]
fn invalid_settings_are_validation_errors() {
    for bad in [
        r#"{ "export_file_name": "" }"#,
        r#"{ "export_file_name": "../out.png" }"#,
        r#"{ "default_mode": "sepia" }"#,
        r#"{ "unknown_key": 1 }"#,
        "not json",
    ] {
        let err = SessionSettings::from_reader(Cursor::new(bad)).unwrap_err();
        assert!(matches!(err, PicframeError::Validation(_)), "{bad}: {err}");
    }
}

#[test]
fn from_path_reports_missing_file() {
    let err = SessionSettings::from_path("target/settings_missing/none.json").unwrap_err();
    assert!(err.to_string().contains("open settings JSON"));
}
