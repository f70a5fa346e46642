use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use declutter_core::{PhraseSet, DEFAULT_PHRASES};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Delays used by the navigation monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    /// Period of the navigation poll.
    pub poll_period: Duration,
    /// Wait before the first region probe after a URL change, letting the
    /// host replace the previous page's content.
    pub settle_delay: Duration,
    pub settle_probe_interval: Duration,
    /// Total wait after which a region that never appeared counts as absent.
    pub settle_timeout: Duration,
    /// Deferral between losing the region and removing the toggle control,
    /// so a pass already in flight can still render once.
    pub removal_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            poll_period: Duration::from_millis(1000),
            settle_delay: Duration::from_millis(500),
            settle_probe_interval: Duration::from_millis(100),
            settle_timeout: Duration::from_millis(2000),
            removal_delay: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub phrases: PhraseSet,
    pub timing: Timing,
}

impl Settings {
    pub fn with_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: PhraseSet::new(phrases),
            timing: Timing::default(),
        }
    }

    pub fn from_ron(text: &str) -> Result<Self, SettingsError> {
        let file: SettingsFile = ron::from_str(text)?;
        Ok(file.into())
    }
}

/// Loads settings from a RON file. Omitted fields take their defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let text = fs::read_to_string(path)?;
    Settings::from_ron(&text)
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SettingsFile {
    phrases: Vec<String>,
    timing: TimingFile,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
            timing: TimingFile::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TimingFile {
    poll_period_ms: u64,
    settle_delay_ms: u64,
    settle_probe_interval_ms: u64,
    settle_timeout_ms: u64,
    removal_delay_ms: u64,
}

impl Default for TimingFile {
    fn default() -> Self {
        let timing = Timing::default();
        Self {
            poll_period_ms: millis(timing.poll_period),
            settle_delay_ms: millis(timing.settle_delay),
            settle_probe_interval_ms: millis(timing.settle_probe_interval),
            settle_timeout_ms: millis(timing.settle_timeout),
            removal_delay_ms: millis(timing.removal_delay),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

impl From<SettingsFile> for Settings {
    fn from(file: SettingsFile) -> Self {
        let timing = file.timing;
        Self {
            phrases: PhraseSet::new(file.phrases),
            timing: Timing {
                // A zero period would spin the poll loop.
                poll_period: Duration::from_millis(timing.poll_period_ms.max(1)),
                settle_delay: Duration::from_millis(timing.settle_delay_ms),
                settle_probe_interval: Duration::from_millis(timing.settle_probe_interval_ms.max(1)),
                settle_timeout: Duration::from_millis(timing.settle_timeout_ms),
                removal_delay: Duration::from_millis(timing.removal_delay_ms),
            },
        }
    }
}
