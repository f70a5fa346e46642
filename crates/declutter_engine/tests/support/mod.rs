#![allow(dead_code)]

use std::sync::Once;

use declutter_engine::HtmlPage;

pub const PR_URL: &str = "https://github.com/acme/widgets/pull/7";
pub const OTHER_PR_URL: &str = "https://github.com/acme/widgets/pull/8";
pub const ISSUES_URL: &str = "https://github.com/acme/widgets/issues";

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn item(text: &str) -> String {
    format!(r#"<div class="js-timeline-item TimelineItem"><div class="comment-body">{text}</div></div>"#)
}

pub fn items(texts: &[&str]) -> String {
    texts.iter().map(|text| item(text)).collect()
}

pub fn load_more_control() -> &'static str {
    r#"<button class="ajax-pagination-btn" type="submit">Load more…</button>"#
}

/// A pull request conversation page with `texts` as timeline items.
pub fn pull_request(texts: &[&str], load_more: bool) -> String {
    let control = if load_more { load_more_control() } else { "" };
    format!(
        r#"<!DOCTYPE html><html><head><title>PR</title></head><body>
        <div class="repository-content">
          <div class="pull-discussion-timeline">{}{}</div>
        </div>
        </body></html>"#,
        items(texts),
        control
    )
}

pub fn without_timeline() -> &'static str {
    r#"<!DOCTYPE html><html><body><ul class="issues"><li>Bug</li></ul></body></html>"#
}

/// Every item carries exactly one of the two markers.
pub fn assert_single_marker(page: &HtmlPage) {
    for item in page.items() {
        assert!(
            item.visible != item.hidden,
            "item {:?} has visible={} hidden={}",
            item.text,
            item.visible,
            item.hidden
        );
    }
}
