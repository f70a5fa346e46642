use std::time::Duration;

use declutter_core::Navigation;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::{PageDom, Timing};

/// Recurring navigation poll. Only runs while the page is in the foreground.
#[derive(Debug)]
pub struct NavigationMonitor {
    period: Duration,
    interval: Option<Interval>,
    ticks: u64,
}

impl NavigationMonitor {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
            ticks: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Starts polling one period from now. A running poll is left alone.
    pub fn start(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
    }

    /// Cancels the poll; nothing about missed ticks is remembered.
    pub fn stop(&mut self) {
        self.interval = None;
    }

    /// Resolves on the next poll; never resolves while stopped.
    pub async fn tick(&mut self) -> u64 {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
        self.ticks += 1;
        self.ticks
    }
}

/// Outcome of one look for the target region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe<N> {
    Found(N),
    /// Not rendered yet; look again after the probe interval.
    Pending,
    TimedOut,
}

/// Waits until the host page has rendered the target region for one
/// navigation, or the settle timeout passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionWait {
    navigation: Navigation,
    deadline: Instant,
}

impl RegionWait {
    pub fn new(navigation: Navigation, timing: &Timing) -> Self {
        Self {
            navigation,
            deadline: Instant::now() + timing.settle_timeout,
        }
    }

    pub fn navigation(&self) -> Navigation {
        self.navigation
    }

    pub fn probe<P: PageDom>(&self, page: &P) -> Probe<P::Node> {
        match page.find_region() {
            Some(region) => Probe::Found(region),
            None if Instant::now() >= self.deadline => Probe::TimedOut,
            None => Probe::Pending,
        }
    }
}
