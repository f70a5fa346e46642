use crate::{Marker, PageDom};

/// Items of one target region and their hide/show markers.
pub struct ItemStore<'a, P: PageDom> {
    page: &'a P,
    region: Option<P::Node>,
}

impl<'a, P: PageDom> ItemStore<'a, P> {
    /// A store without a region is empty.
    pub fn new(page: &'a P, region: Option<P::Node>) -> Self {
        Self { page, region }
    }

    pub fn all_items(&self) -> Vec<P::Node> {
        match self.region {
            Some(region) => self.page.query_items(region),
            None => Vec::new(),
        }
    }

    pub fn hidden_items(&self) -> Vec<P::Node> {
        self.all_items()
            .into_iter()
            .filter(|item| self.page.marker(*item) == Some(Marker::Hidden))
            .collect()
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden_items().len()
    }

    pub fn text(&self, item: P::Node) -> String {
        self.page.item_text(item)
    }

    pub fn hide(&self, item: P::Node) {
        self.page.set_marker(item, Marker::Hidden);
    }

    pub fn show(&self, item: P::Node) {
        self.page.set_marker(item, Marker::Visible);
    }
}
