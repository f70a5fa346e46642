//! Command-line host: loads saved pages into an in-memory page, runs a
//! session against it and reports what ended up hidden.
pub mod cli;

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use declutter_core::{PhraseSet, RegionState, Status};
use declutter_engine::{load_settings, HtmlPage, Session, Settings};
use engine_logging::{engine_info, engine_warn};

use crate::cli::Cli;

const STEP: Duration = Duration::from_millis(100);

/// What the session left behind on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub label: Option<String>,
    pub status: Option<Status>,
    pub total_items: usize,
    pub hidden: Vec<String>,
    /// False if the timeline was still loading or settling at the deadline.
    pub settled: bool,
}

impl Report {
    fn from_page(page: &HtmlPage, settled: bool) -> Self {
        let button = page.button();
        Self {
            label: button.as_ref().map(|view| view.label.clone()),
            status: button.map(|view| view.status),
            total_items: page.items().len(),
            hidden: page.hidden_texts(),
            settled,
        }
    }
}

pub fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if !cli.phrases.is_empty() {
        let phrases = settings.phrases.iter().map(str::to_string);
        settings.phrases = PhraseSet::new(phrases.chain(cli.phrases.iter().cloned()));
    }
    Ok(settings)
}

pub fn load_page(cli: &Cli) -> Result<HtmlPage> {
    let page = HtmlPage::new(cli.url.clone(), &read_html(&cli.page)?);
    for next in &cli.more {
        page.queue_continuation(read_html(next)?);
    }
    Ok(page)
}

fn read_html(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Runs one session over the page until the timeline has settled or the
/// timeout passes.
pub async fn run(cli: &Cli) -> Result<Report> {
    let settings = resolve_settings(cli)?;
    let page = load_page(cli)?;
    engine_info!(
        "{} with {} continuation pages, {} phrases",
        cli.page.display(),
        cli.more.len(),
        settings.phrases.len()
    );

    let mut session = Session::new(page.clone(), page.clone(), settings);
    let handle = session.handle();
    handle.page_loaded();

    let timeout = Duration::from_millis(cli.timeout_ms);
    let settled = settle(&mut session, &page, timeout).await;
    if !settled {
        engine_warn!("timeline did not settle within {} ms", cli.timeout_ms);
    }
    if settled && cli.reveal && handle.toggle_clicked() {
        session.run_for(STEP).await;
    }

    let report = Report::from_page(&page, settled);
    handle.shutdown();
    session.run_for(STEP).await;
    Ok(report)
}

/// Settled once a navigation has been seen, the region wait is over and
/// either the watcher stopped or the last "Load more" click had no saved
/// page behind it, so nothing further will be inserted.
async fn settle(
    session: &mut Session<HtmlPage, HtmlPage>,
    page: &HtmlPage,
    timeout: Duration,
) -> bool {
    let mut waited = Duration::ZERO;
    while waited < timeout {
        if session.run_for(STEP).await {
            return false;
        }
        waited += STEP;
        let view = session.view();
        if view.navigation == 0 || view.region == RegionState::Settling {
            continue;
        }
        if !session.is_watching() {
            return true;
        }
        if view.status() == Some(Status::Loading) && page.pagination_exhausted() {
            engine_warn!("page has more timeline entries than were saved; pass --more to include them");
            return true;
        }
    }
    false
}

pub fn print_report(report: &Report) {
    match &report.label {
        Some(label) => println!("{label}"),
        None => println!("no timeline found"),
    }
    for text in &report.hidden {
        println!("  hidden: {text}");
    }
    println!(
        "{} of {} items hidden",
        report.hidden.len(),
        report.total_items
    );
}
