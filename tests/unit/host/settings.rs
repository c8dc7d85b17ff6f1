use super::*;

fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "backdrop_settings_{}_{}_{name}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0)
    ))
}

#[test]
fn defaults_are_thirty_fps_and_soft_filter() {
    let s = HostSettings::default();
    assert_eq!(s.target_fps, 30.0);
    assert_eq!(s.filter, PresentFilter::default());
}

#[test]
fn partial_json_fills_defaults() {
    let s = HostSettings::from_json(r#"{ "target_fps": 48 }"#);
    assert_eq!(s.target_fps, 48.0);
    assert_eq!(s.filter.brightness, 0.9);
}

#[test]
fn unusable_fps_falls_back() {
    for json in [r#"{ "target_fps": 0 }"#, r#"{ "target_fps": -5 }"#] {
        assert_eq!(HostSettings::from_json(json).target_fps, 30.0);
    }
}

#[test]
fn wrongly_typed_fps_falls_back() {
    for json in [
        r#"{ "target_fps": null }"#,
        r#"{ "target_fps": "abc" }"#,
        r#"{ "target_fps": [60] }"#,
        r#"{ "target_fps": true }"#,
    ] {
        let s = HostSettings::from_json(json);
        assert_eq!(s.target_fps, 30.0, "{json}");
    }
}

#[test]
fn numeric_string_fps_is_accepted() {
    assert_eq!(HostSettings::from_json(r#"{ "target_fps": " 24 " }"#).target_fps, 24.0);
    assert_eq!(HostSettings::from_json(r#"{ "target_fps": "-3" }"#).target_fps, 30.0);
}

#[test]
fn wrongly_typed_filter_keeps_fps() {
    let s = HostSettings::from_json(r#"{ "target_fps": 50, "filter": { "blur_px": "x" } }"#);
    assert_eq!(s.target_fps, 50.0);
    assert_eq!(s.filter, PresentFilter::default());
}

#[test]
fn malformed_json_yields_defaults() {
    for json in ["{ nope", "", "42", "\"fps\""] {
        assert_eq!(HostSettings::from_json(json), HostSettings::default(), "{json:?}");
    }
}

#[test]
fn corrupt_file_loads_defaults() {
    let path = scratch_path("corrupt");
    std::fs::write(&path, r#"{ "target_fps": null, "#).unwrap();
    assert_eq!(HostSettings::load(&path).unwrap(), HostSettings::default());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_loads_defaults() {
    let s = HostSettings::load(scratch_path("missing")).unwrap();
    assert_eq!(s, HostSettings::default());
}

#[test]
fn save_then_load() {
    let path = scratch_path("saved");
    let s = HostSettings {
        target_fps: 12.5,
        filter: PresentFilter::none(),
    };
    s.save(&path).unwrap();
    assert_eq!(HostSettings::load(&path).unwrap(), s);
    let _ = std::fs::remove_file(&path);
}
