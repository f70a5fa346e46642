mod support;

use std::time::Duration;

use declutter_engine::{HtmlPage, NavigationMonitor, PageDom, Probe, RegionWait, Timing};
use pretty_assertions::assert_eq;

use support::{pull_request, without_timeline, ISSUES_URL, PR_URL};

#[tokio::test(start_paused = true)]
async fn probe_finds_rendered_region() {
    let page = HtmlPage::new(PR_URL, &pull_request(&["a"], false));
    let wait = RegionWait::new(3, &Timing::default());

    assert_eq!(wait.navigation(), 3);
    assert_eq!(wait.probe(&page), Probe::Found(page.find_region().unwrap()));
}

#[tokio::test(start_paused = true)]
async fn probe_is_pending_until_the_timeout() {
    let page = HtmlPage::new(ISSUES_URL, without_timeline());
    let timing = Timing::default();
    let wait = RegionWait::new(1, &timing);

    assert_eq!(wait.probe(&page), Probe::Pending);
    tokio::time::advance(timing.settle_timeout - Duration::from_millis(1)).await;
    assert_eq!(wait.probe(&page), Probe::Pending);
    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(wait.probe(&page), Probe::TimedOut);
}

#[tokio::test(start_paused = true)]
async fn late_region_is_still_found() {
    let page = HtmlPage::new(ISSUES_URL, without_timeline());
    let wait = RegionWait::new(1, &Timing::default());
    assert_eq!(wait.probe(&page), Probe::Pending);

    tokio::time::advance(Duration::from_millis(1_200)).await;
    page.navigate(PR_URL, &pull_request(&[], false));
    assert!(matches!(wait.probe(&page), Probe::Found(_)));
}

#[tokio::test(start_paused = true)]
async fn monitor_counts_ticks_across_restarts() {
    let mut monitor = NavigationMonitor::new(Duration::from_millis(250));
    assert!(!monitor.is_running());

    monitor.start();
    assert!(monitor.is_running());
    monitor.tick().await;
    monitor.tick().await;
    monitor.stop();
    assert!(!monitor.is_running());

    monitor.start();
    assert_eq!(monitor.tick().await, 3);
    assert_eq!(monitor.ticks(), 3);
}
