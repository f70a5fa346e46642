use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use declutter_app::cli::{Cli, LogTarget};
use declutter_core::Status;
use engine_logging::LogDestination;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn item(text: &str) -> String {
    format!(r#"<div class="js-timeline-item TimelineItem"><p>{text}</p></div>"#)
}

fn write(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

fn conversation(dir: &Path) -> (String, String) {
    let first = write(
        dir,
        "page.html",
        &format!(
            r#"<html><body><div class="pull-discussion-timeline">{}{}<button>Load more…</button></div></body></html>"#,
            item("alice force-pushed the branch"),
            item("Please fix the typo"),
        ),
    );
    let next = write(
        dir,
        "next.html",
        &format!("{}{}", item("deploy-bot deployed to staging"), item("Thanks!")),
    );
    (first, next)
}

#[test]
fn parses_repeated_options() {
    let cli = Cli::parse_from([
        "declutter",
        "page.html",
        "--more",
        "a.html",
        "--more",
        "b.html",
        "--phrase",
        "deployed",
        "--log",
        "both",
        "--log-file",
        "run.log",
        "-v",
    ]);
    assert_eq!(cli.more.len(), 2);
    assert_eq!(cli.phrases, vec!["deployed"]);
    assert_eq!(cli.log, LogTarget::Both);
    assert_eq!(
        cli.log_destination(),
        LogDestination::Both(PathBuf::from("run.log"))
    );
    assert_eq!(cli.log_level(), log::LevelFilter::Debug);
    assert_eq!(cli.timeout_ms, 10_000);
}

#[test]
fn log_file_defaults_to_working_directory() {
    let cli = Cli::parse_from(["declutter", "page.html", "--log", "file"]);
    assert_eq!(
        cli.log_destination(),
        LogDestination::File(PathBuf::from(engine_logging::LOG_FILE_NAME))
    );
}

#[tokio::test(start_paused = true)]
async fn hides_noise_across_continuation_pages() {
    let dir = TempDir::new().unwrap();
    let (page, next) = conversation(dir.path());
    let cli = Cli::parse_from([
        "declutter",
        page.as_str(),
        "--more",
        next.as_str(),
        "--phrase",
        "deployed",
    ]);

    let report = declutter_app::run(&cli).await.unwrap();

    assert!(report.settled);
    assert_eq!(report.status, Some(Status::Active));
    assert_eq!(report.label.as_deref(), Some("2 events hidden"));
    assert_eq!(report.total_items, 4);
    assert_eq!(
        report.hidden,
        vec![
            "alice force-pushed the branch",
            "deploy-bot deployed to staging"
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn reveal_leaves_everything_visible() {
    let dir = TempDir::new().unwrap();
    let (page, next) = conversation(dir.path());
    let cli = Cli::parse_from([
        "declutter",
        page.as_str(),
        "--more",
        next.as_str(),
        "--reveal",
    ]);

    let report = declutter_app::run(&cli).await.unwrap();

    assert_eq!(report.status, Some(Status::Idle));
    assert_eq!(report.label.as_deref(), Some("Click to hide 1 event"));
    assert!(report.hidden.is_empty());
}

#[tokio::test(start_paused = true)]
async fn settings_file_replaces_default_phrases() {
    let dir = TempDir::new().unwrap();
    let (page, next) = conversation(dir.path());
    let settings = write(dir.path(), "declutter.ron", r#"(phrases: ["typo"])"#);
    let cli = Cli::parse_from([
        "declutter",
        page.as_str(),
        "--more",
        next.as_str(),
        "--settings",
        settings.as_str(),
    ]);

    let report = declutter_app::run(&cli).await.unwrap();

    assert!(report.settled);
    assert_eq!(report.hidden, vec!["Please fix the typo"]);
}

#[tokio::test(start_paused = true)]
async fn unsaved_load_more_pages_end_the_run_early() {
    let dir = TempDir::new().unwrap();
    let (page, _) = conversation(dir.path());
    let cli = Cli::parse_from(["declutter", page.as_str()]);
    let started = tokio::time::Instant::now();

    let report = declutter_app::run(&cli).await.unwrap();

    assert!(report.settled);
    assert!(started.elapsed() < std::time::Duration::from_secs(3));
    assert_eq!(report.status, Some(Status::Loading));
    assert_eq!(report.label.as_deref(), Some("1 event hidden"));
    assert_eq!(report.hidden, vec!["alice force-pushed the branch"]);
    assert_eq!(report.total_items, 2);
}

#[tokio::test(start_paused = true)]
async fn page_without_timeline_reports_nothing() {
    let dir = TempDir::new().unwrap();
    let page = write(dir.path(), "issues.html", "<html><body><p>Issues</p></body></html>");
    let cli = Cli::parse_from(["declutter", page.as_str()]);

    let report = declutter_app::run(&cli).await.unwrap();

    assert!(report.settled);
    assert_eq!(report.label, None);
    assert_eq!(report.total_items, 0);
}

#[tokio::test]
async fn missing_page_is_reported_with_its_path() {
    let cli = Cli::parse_from(["declutter", "/nonexistent/page.html"]);
    let err = declutter_app::run(&cli).await.unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/page.html"));
}

#[tokio::test]
async fn broken_settings_file_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let (page, _) = conversation(dir.path());
    let settings = write(dir.path(), "declutter.ron", "(phrases: [");
    let cli = Cli::parse_from(["declutter", page.as_str(), "--settings", settings.as_str()]);

    let err = declutter_app::run(&cli).await.unwrap_err();
    assert!(err.to_string().contains("failed to load settings"));
}
