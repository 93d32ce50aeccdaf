use super::*;

use std::fs;

#[test]
fn defaults_point_at_local_demo_server() {
    let settings = ClientSettings::default();
    settings.validate().expect("defaults are valid");
    assert_eq!(settings.endpoint, "http://127.0.0.1:5000/personalize");
    assert_eq!(settings.request_timeout(), Duration::from_secs(10));
}

#[test]
fn tracking_id_is_last_arn_segment() {
    let settings = ClientSettings::default();
    assert_eq!(settings.tracking_id(), "iot-lights-event-tracker");

    let bare = ClientSettings {
        event_tracker_arn: "tracker-only".into(),
        ..ClientSettings::default()
    };
    assert_eq!(bare.tracking_id(), "tracker-only");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join("absent.toml")).expect("load");
    assert_eq!(settings.request_timeout_secs, 10);
    assert_eq!(settings.event_source, "cli");
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lights.toml");
    fs::write(
        &path,
        r#"
endpoint = "https://recs.example.com/api"
request_timeout_secs = 3
event_source = "kiosk"
"#,
    )
    .expect("write config");

    let settings = load_settings_from(&path).expect("load");
    assert_eq!(settings.endpoint, "https://recs.example.com/api");
    assert_eq!(settings.request_timeout(), Duration::from_secs(3));
    assert_eq!(settings.event_source, "kiosk");
    assert_eq!(settings.database_url, ClientSettings::default().database_url);
}

#[test]
fn rejects_invalid_endpoint_and_zero_timeout() {
    let bad_endpoint = ClientSettings {
        endpoint: "not a url".into(),
        ..ClientSettings::default()
    };
    assert!(bad_endpoint.validate().is_err());

    let ftp = ClientSettings {
        endpoint: "ftp://example.com".into(),
        ..ClientSettings::default()
    };
    assert!(ftp.validate().is_err());

    let zero_timeout = ClientSettings {
        request_timeout_secs: 0,
        ..ClientSettings::default()
    };
    assert!(zero_timeout.validate().is_err());
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(
        normalize_database_url("sqlite:data\\test.db"),
        "sqlite://data/test.db"
    );
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(
        normalize_database_url("  "),
        ClientSettings::default().database_url
    );
}
