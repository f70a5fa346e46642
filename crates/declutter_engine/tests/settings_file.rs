use std::fs;
use std::time::Duration;

use declutter_core::PhraseSet;
use declutter_engine::{load_settings, Settings, SettingsError, Timing};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn loads_phrases_and_timing_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("declutter.ron");
    fs::write(
        &path,
        r#"(
            phrases: ["force-pushed", "", "force-pushed", "deployed"],
            timing: (
                poll_period_ms: 2000,
                removal_delay_ms: 0,
            ),
        )"#,
    )
    .unwrap();

    let settings = load_settings(&path).unwrap();

    assert_eq!(settings.phrases, PhraseSet::new(["force-pushed", "deployed"]));
    assert_eq!(
        settings.timing,
        Timing {
            poll_period: Duration::from_secs(2),
            removal_delay: Duration::ZERO,
            ..Timing::default()
        }
    );
}

#[test]
fn omitted_phrases_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("declutter.ron");
    fs::write(&path, "(timing: (settle_timeout_ms: 500))").unwrap();

    let settings = load_settings(&path).unwrap();

    assert_eq!(settings.phrases, PhraseSet::default());
    assert_eq!(settings.timing.settle_timeout, Duration::from_millis(500));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_settings(&dir.path().join("absent.ron")).unwrap_err();
    assert!(matches!(err, SettingsError::Io(_)));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("declutter.ron");
    fs::write(&path, "(phrases: [unterminated").unwrap();

    let err = load_settings(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Parse(_)));
    assert!(err.to_string().starts_with("invalid settings"));
}

#[test]
fn explicit_empty_phrase_list_disables_hiding() {
    let settings = Settings::from_ron("(phrases: [])").unwrap();
    assert!(settings.phrases.is_empty());
}
