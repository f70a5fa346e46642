use declutter_core::PhraseSet;
use engine_logging::engine_trace;

use crate::{ItemStore, PageDom, PaginationLoader};

/// Result of one classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassOutcome {
    pub examined: usize,
    /// Items carrying the hidden marker once the pass finished.
    pub hidden: usize,
    pub load_more_activated: bool,
}

/// Re-evaluates every item from scratch: matches are hidden, everything
/// else is shown, so an item whose text changed is reclassified.
/// Returns the number of items examined.
pub fn classify_items<P: PageDom>(store: &ItemStore<'_, P>, phrases: &PhraseSet) -> usize {
    let items = store.all_items();
    for item in &items {
        let text = store.text(*item);
        match phrases.first_match(&text) {
            Some(phrase) => {
                engine_trace!("hiding {:?}: matched {:?}", item, phrase);
                store.hide(*item);
            }
            None => store.show(*item),
        }
    }
    items.len()
}

/// One full pass over `region`: classify, then try to continue pagination.
/// Without a region there is nothing to classify and nothing to page through.
pub fn tidy<P: PageDom>(
    page: &P,
    region: Option<P::Node>,
    phrases: &PhraseSet,
    loader: &PaginationLoader,
) -> PassOutcome {
    let store = ItemStore::new(page, region);
    let examined = classify_items(&store, phrases);
    let load_more_activated = region.is_some() && loader.load_more_if_available(page);
    PassOutcome {
        examined,
        hidden: store.hidden_count(),
        load_more_activated,
    }
}
