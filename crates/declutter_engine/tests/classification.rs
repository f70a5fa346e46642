mod support;

use declutter_core::PhraseSet;
use declutter_engine::{
    classify_items, tidy, HtmlPage, ItemStore, Marker, PageDom, PaginationLoader, PassOutcome,
};
use pretty_assertions::assert_eq;

use support::{assert_single_marker, pull_request, without_timeline, ISSUES_URL, PR_URL};

fn phrases() -> PhraseSet {
    PhraseSet::new(["force-pushed", "added some commits"])
}

#[test]
fn tidy_hides_matching_items_only() {
    let page = HtmlPage::new(
        PR_URL,
        &pull_request(
            &[
                "octocat force-pushed the branch",
                "Looks good to me",
                "octocat added some commits 2 days ago",
            ],
            false,
        ),
    );
    let region = page.find_region();

    let outcome = tidy(&page, region, &phrases(), &PaginationLoader::default());

    assert_eq!(
        outcome,
        PassOutcome {
            examined: 3,
            hidden: 2,
            load_more_activated: false,
        }
    );
    assert_eq!(
        page.hidden_texts(),
        vec![
            "octocat force-pushed the branch",
            "octocat added some commits 2 days ago"
        ]
    );
    assert_single_marker(&page);
}

#[test]
fn phrases_match_across_inline_markup() {
    let html = r#"<html><body><div class="pull-discussion-timeline">
        <div class="js-timeline-item TimelineItem"><p><strong>stale</strong>: closing soon</p></div>
        <div class="js-timeline-item TimelineItem"><p>octocat force-<em>pushed</em> the branch</p></div>
        <div class="js-timeline-item TimelineItem"><p><a href="/u">alice</a> approved</p></div>
    </div></body></html>"#;
    let page = HtmlPage::new(PR_URL, html);
    let region = page.find_region();

    let outcome = tidy(
        &page,
        region,
        &PhraseSet::new(["stale:", "force-pushed"]),
        &PaginationLoader::default(),
    );

    assert_eq!(outcome.hidden, 2);
    assert_eq!(
        page.hidden_texts(),
        vec![
            "stale: closing soon",
            "octocat force-pushed the branch"
        ]
    );
    assert_eq!(page.items()[2].text, "alice approved");
}

#[test]
fn second_pass_changes_nothing() {
    let page = HtmlPage::new(PR_URL, &pull_request(&["force-pushed", "ok"], false));
    let region = page.find_region();
    let loader = PaginationLoader::default();

    let first = tidy(&page, region, &phrases(), &loader);
    let before = page.items();
    let second = tidy(&page, region, &phrases(), &loader);

    assert_eq!(first, second);
    assert_eq!(page.items(), before);
}

#[test]
fn previously_hidden_item_is_shown_once_it_stops_matching() {
    let page = HtmlPage::new(PR_URL, &pull_request(&["force-pushed"], false));
    let region = page.find_region();
    let store = ItemStore::new(&page, region);
    classify_items(&store, &phrases());
    assert_eq!(store.hidden_count(), 1);

    page.set_item_text(0, "rebased onto main");
    classify_items(&store, &phrases());

    assert_eq!(store.hidden_count(), 0);
    assert!(page.items()[0].visible);
    assert_single_marker(&page);
}

#[test]
fn empty_phrase_set_shows_everything() {
    let page = HtmlPage::new(PR_URL, &pull_request(&["force-pushed", "ok"], false));
    let region = page.find_region();
    let store = ItemStore::new(&page, region);
    store.hide(store.all_items()[1]);

    let examined = classify_items(&store, &PhraseSet::new(Vec::<String>::new()));

    assert_eq!(examined, 2);
    assert!(page.hidden_texts().is_empty());
}

#[test]
fn store_hide_and_show_swap_markers() {
    let page = HtmlPage::new(PR_URL, &pull_request(&["a", "b"], false));
    let store = ItemStore::new(&page, page.find_region());
    let items = store.all_items();

    store.hide(items[0]);
    store.hide(items[0]);
    assert_eq!(page.marker(items[0]), Some(Marker::Hidden));
    assert_eq!(store.hidden_items(), vec![items[0]]);

    store.show(items[0]);
    assert_eq!(page.marker(items[0]), Some(Marker::Visible));
    assert_eq!(store.hidden_count(), 0);
    assert_eq!(store.text(items[1]), "b");
}

#[test]
fn missing_region_yields_empty_pass() {
    let page = HtmlPage::new(ISSUES_URL, without_timeline());
    assert_eq!(page.find_region(), None);

    let store = ItemStore::new(&page, None);
    assert!(store.all_items().is_empty());
    assert_eq!(store.hidden_count(), 0);

    let outcome = tidy(&page, None, &phrases(), &PaginationLoader::default());
    assert_eq!(outcome, PassOutcome::default());
}

#[test]
fn region_without_items_is_not_an_error() {
    let page = HtmlPage::new(PR_URL, &pull_request(&[], false));
    let outcome = tidy(
        &page,
        page.find_region(),
        &phrases(),
        &PaginationLoader::default(),
    );
    assert_eq!(outcome.examined, 0);
    assert_eq!(outcome.hidden, 0);
}
