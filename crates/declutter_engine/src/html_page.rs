//! In-memory host page.
//!
//! `HtmlPage` parses HTML with `scraper` into its own mutable `ego_tree`
//! tree and behaves like the single-page application the engine is written
//! against: it navigates without reloading, appends timeline items when its
//! "Load more" control is clicked, reports insertions to subscribed
//! observers, and hosts the injected toggle button.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use declutter_core::ButtonView;
use ego_tree::{NodeId, NodeMut, NodeRef, Tree};
use scraper::Html;

use crate::{
    AddedNode, InsertionBatch, Marker, NavigationSource, PageContract, PageDom, SessionHandle,
    SubscriptionId,
};

const ACTIVE_CLASS: &str = "pr-noise-active";
const BUSY_CLASS: &str = "pr-noise-loading";

#[derive(Debug, Clone, PartialEq, Eq)]
enum PageNode {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ElementData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
}

impl ElementData {
    fn from_scraper(element: &scraper::node::Element) -> Self {
        Self {
            tag: element.name().to_ascii_lowercase(),
            id: element.id().map(str::to_string),
            classes: element.classes().map(str::to_string).collect(),
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}

/// Node reference into one loaded document. References from a document
/// that has since been navigated away from resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageNodeId {
    document: u64,
    id: NodeId,
}

/// Marker classes of one item as the host page sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub text: String,
    pub visible: bool,
    pub hidden: bool,
}

struct Observer {
    id: SubscriptionId,
    document: u64,
    region: NodeId,
    sink: SessionHandle,
}

struct InjectedButton {
    node: NodeId,
    text: NodeId,
    view: ButtonView,
    events: SessionHandle,
}

struct PageInner {
    url: String,
    document: u64,
    tree: Tree<PageNode>,
    contract: PageContract,
    continuations: VecDeque<String>,
    observers: Vec<Observer>,
    next_subscription: u64,
    button: Option<InjectedButton>,
    renders: Vec<ButtonView>,
    activations: usize,
    /// Set when a "Load more" click found no queued page behind it.
    pagination_exhausted: bool,
}

/// Shared handle to an in-memory page; clones see the same page.
#[derive(Clone)]
pub struct HtmlPage {
    inner: Rc<RefCell<PageInner>>,
}

impl HtmlPage {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self::with_contract(url, html, PageContract::default())
    }

    pub fn with_contract(url: impl Into<String>, html: &str, contract: PageContract) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PageInner {
                url: url.into(),
                document: 1,
                tree: parse_document(html),
                contract,
                continuations: VecDeque::new(),
                observers: Vec::new(),
                next_subscription: 1,
                button: None,
                renders: Vec::new(),
                activations: 0,
                pagination_exhausted: false,
            })),
        }
    }

    pub fn contract(&self) -> PageContract {
        self.inner.borrow().contract.clone()
    }

    /// Client-side navigation: swaps the document without a reload. The
    /// injected toggle button stays attached to the new document.
    pub fn navigate(&self, url: impl Into<String>, html: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.url = url.into();
        inner.document += 1;
        inner.tree = parse_document(html);
        inner.continuations.clear();
        inner.pagination_exhausted = false;
        let document = inner.document;
        inner.observers.retain(|observer| observer.document == document);
        if let Some(button) = inner.button.take() {
            if let Some((node, text)) = inner.inject_button(&button.view) {
                inner.button = Some(InjectedButton {
                    node,
                    text,
                    ..button
                });
            }
        }
    }

    /// Queues a page of items delivered by the next "Load more" click.
    pub fn queue_continuation(&self, html: impl Into<String>) {
        self.inner.borrow_mut().continuations.push_back(html.into());
    }

    pub fn remaining_continuations(&self) -> usize {
        self.inner.borrow().continuations.len()
    }

    /// Host-side insertion of `html` at the end of the target region.
    /// Returns the number of inserted nodes; 0 if the page has no region.
    pub fn append_to_region(&self, html: &str) -> usize {
        let batch = {
            let mut inner = self.inner.borrow_mut();
            match inner.region_id() {
                Some(region) => inner.append_html(region, html),
                None => return 0,
            }
        };
        let count = batch.len();
        self.notify(batch);
        count
    }

    /// Rewrites an item's text without any structural change, the way a
    /// host edits a comment in place.
    pub fn set_item_text(&self, index: usize, text: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(item) = inner.item_ids().get(index).copied() else {
            return false;
        };
        let text_nodes: Vec<NodeId> = match inner.tree.get(item) {
            Some(node) => node
                .descendants()
                .filter(|n| matches!(n.value(), PageNode::Text(_)))
                .map(|n| n.id())
                .collect(),
            None => return false,
        };
        for (position, id) in text_nodes.into_iter().enumerate() {
            if let Some(mut node) = inner.tree.get_mut(id) {
                *node.value() = PageNode::Text(if position == 0 {
                    text.to_string()
                } else {
                    String::new()
                });
            }
        }
        true
    }

    /// Clicks the injected toggle button. Returns false if there is none.
    pub fn click_button(&self) -> bool {
        let events = match self.inner.borrow().button.as_ref() {
            Some(button) => button.events.clone(),
            None => return false,
        };
        events.toggle_clicked()
    }

    pub fn url(&self) -> String {
        self.inner.borrow().url.clone()
    }

    pub fn button(&self) -> Option<ButtonView> {
        self.inner
            .borrow()
            .button
            .as_ref()
            .map(|button| button.view.clone())
    }

    /// Every view rendered onto the button, oldest first.
    pub fn render_history(&self) -> Vec<ButtonView> {
        self.inner.borrow().renders.clone()
    }

    /// Whether the button element is attached to the current document.
    pub fn button_in_document(&self) -> bool {
        let inner = self.inner.borrow();
        let button_id = inner.contract.button_id.as_str();
        inner.tree.root().descendants().any(|node| {
            matches!(node.value(), PageNode::Element(e) if e.id.as_deref() == Some(button_id))
        })
    }

    pub fn items(&self) -> Vec<ItemSnapshot> {
        let inner = self.inner.borrow();
        inner
            .item_ids()
            .into_iter()
            .filter_map(|id| inner.tree.get(id))
            .filter_map(|node| match node.value() {
                PageNode::Element(element) => Some(ItemSnapshot {
                    text: text_of(node),
                    visible: element.has_class(&inner.contract.visible_class),
                    hidden: element.has_class(&inner.contract.hidden_class),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn hidden_texts(&self) -> Vec<String> {
        self.items()
            .into_iter()
            .filter(|item| item.hidden)
            .map(|item| item.text)
            .collect()
    }

    /// Live subscriptions on the current document.
    pub fn observer_count(&self) -> usize {
        let inner = self.inner.borrow();
        inner
            .observers
            .iter()
            .filter(|observer| observer.document == inner.document)
            .count()
    }

    /// Number of programmatic control activations so far.
    pub fn activations(&self) -> usize {
        self.inner.borrow().activations
    }

    /// Whether the last "Load more" click on this document had no page
    /// queued behind it, so no insertion will follow.
    pub fn pagination_exhausted(&self) -> bool {
        self.inner.borrow().pagination_exhausted
    }

    fn notify(&self, appended: Vec<(NodeId, AddedNode)>) {
        let Some((first, _)) = appended.first().copied() else {
            return;
        };
        let added: Vec<AddedNode> = appended.iter().map(|(_, node)| *node).collect();
        let deliveries: Vec<(SubscriptionId, SessionHandle)> = {
            let inner = self.inner.borrow();
            inner
                .observers
                .iter()
                .filter(|observer| observer.document == inner.document)
                .filter(|observer| inner.is_within(first, observer.region))
                .map(|observer| (observer.id, observer.sink.clone()))
                .collect()
        };
        for (subscription, sink) in deliveries {
            sink.insertions(InsertionBatch {
                subscription,
                added: added.clone(),
            });
        }
    }

    fn resolve(&self, node: PageNodeId) -> Option<NodeId> {
        let inner = self.inner.borrow();
        (node.document == inner.document && inner.tree.get(node.id).is_some()).then_some(node.id)
    }

    fn handle(&self, id: NodeId) -> PageNodeId {
        PageNodeId {
            document: self.inner.borrow().document,
            id,
        }
    }
}

impl PageInner {
    fn region_id(&self) -> Option<NodeId> {
        let class = self.contract.region_class.as_str();
        self.tree
            .root()
            .descendants()
            .find(|node| matches!(node.value(), PageNode::Element(e) if e.has_class(class)))
            .map(|node| node.id())
    }

    fn item_ids(&self) -> Vec<NodeId> {
        match self.region_id() {
            Some(region) => self.items_under(region),
            None => Vec::new(),
        }
    }

    fn items_under(&self, region: NodeId) -> Vec<NodeId> {
        let Some(region) = self.tree.get(region) else {
            return Vec::new();
        };
        let visible = self.contract.visible_class.as_str();
        let hidden = self.contract.hidden_class.as_str();
        region
            .descendants()
            .skip(1)
            .filter(|node| {
                matches!(node.value(), PageNode::Element(e) if e.has_class(visible) || e.has_class(hidden))
            })
            .map(|node| node.id())
            .collect()
    }

    fn attachment_point(&self) -> NodeId {
        self.tree
            .root()
            .descendants()
            .find(|node| matches!(node.value(), PageNode::Element(e) if e.tag == "body"))
            .map(|node| node.id())
            .unwrap_or_else(|| self.tree.root().id())
    }

    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        node == ancestor
            || self
                .tree
                .get(node)
                .is_some_and(|n| n.ancestors().any(|a| a.id() == ancestor))
    }

    /// Parses `html` as a fragment and appends its top-level nodes under
    /// `parent`.
    fn append_html(&mut self, parent: NodeId, html: &str) -> Vec<(NodeId, AddedNode)> {
        let fragment = Html::parse_fragment(html);
        let timeline_class = self.contract.timeline_item_class.clone();
        let Some(mut parent) = self.tree.get_mut(parent) else {
            return Vec::new();
        };
        let mut appended = Vec::new();
        for child in fragment.root_element().children() {
            if let Some(id) = import_node(&mut parent, child) {
                let timeline_item = matches!(
                    child.value(),
                    scraper::Node::Element(e) if e.classes().any(|c| c == timeline_class)
                );
                appended.push((id, AddedNode { timeline_item }));
            }
        }
        appended
    }

    fn inject_button(&mut self, view: &ButtonView) -> Option<(NodeId, NodeId)> {
        let attachment = self.attachment_point();
        let element = ElementData {
            tag: "button".to_string(),
            id: Some(self.contract.button_id.clone()),
            classes: button_classes(view),
        };
        let mut parent = self.tree.get_mut(attachment)?;
        let mut button = parent.append(PageNode::Element(element));
        let text = button.append(PageNode::Text(view.label.clone())).id();
        Some((button.id(), text))
    }

    fn update_button(&mut self, view: &ButtonView) {
        let Some((node, text)) = self.button.as_ref().map(|b| (b.node, b.text)) else {
            return;
        };
        if let Some(mut node) = self.tree.get_mut(node) {
            if let PageNode::Element(element) = node.value() {
                element.classes = button_classes(view);
            }
        }
        if let Some(mut text) = self.tree.get_mut(text) {
            *text.value() = PageNode::Text(view.label.clone());
        }
    }

    /// Host behaviour behind the "Load more" control: the control goes
    /// away and the next queued page is appended, followed by a fresh
    /// control while further pages remain.
    fn load_next_page(&mut self, control: NodeId) -> Vec<(NodeId, AddedNode)> {
        if let Some(mut node) = self.tree.get_mut(control) {
            node.detach();
        }
        let Some(region) = self.region_id() else {
            return Vec::new();
        };
        let Some(page) = self.continuations.pop_front() else {
            self.pagination_exhausted = true;
            return Vec::new();
        };
        self.pagination_exhausted = false;
        let mut appended = self.append_html(region, &page);
        if !self.continuations.is_empty() {
            let control = format!(
                "<{tag} class=\"ajax-pagination-btn\">{text}…</{tag}>",
                tag = self.contract.control_tag,
                text = self.contract.load_more_text
            );
            appended.extend(self.append_html(region, &control));
        }
        appended
    }
}

impl PageDom for HtmlPage {
    type Node = PageNodeId;

    fn find_region(&self) -> Option<PageNodeId> {
        let region = self.inner.borrow().region_id()?;
        Some(self.handle(region))
    }

    fn query_items(&self, region: PageNodeId) -> Vec<PageNodeId> {
        let Some(region) = self.resolve(region) else {
            return Vec::new();
        };
        let ids = self.inner.borrow().items_under(region);
        ids.into_iter().map(|id| self.handle(id)).collect()
    }

    fn item_text(&self, item: PageNodeId) -> String {
        let Some(item) = self.resolve(item) else {
            return String::new();
        };
        let inner = self.inner.borrow();
        inner.tree.get(item).map(text_of).unwrap_or_default()
    }

    fn marker(&self, item: PageNodeId) -> Option<Marker> {
        let item = self.resolve(item)?;
        let inner = self.inner.borrow();
        match inner.tree.get(item)?.value() {
            PageNode::Element(e) if e.has_class(&inner.contract.hidden_class) => Some(Marker::Hidden),
            PageNode::Element(e) if e.has_class(&inner.contract.visible_class) => Some(Marker::Visible),
            _ => None,
        }
    }

    fn set_marker(&self, item: PageNodeId, marker: Marker) {
        let Some(item) = self.resolve(item) else {
            return;
        };
        let mut inner = self.inner.borrow_mut();
        let (add, remove) = match marker {
            Marker::Visible => (
                inner.contract.visible_class.clone(),
                inner.contract.hidden_class.clone(),
            ),
            Marker::Hidden => (
                inner.contract.hidden_class.clone(),
                inner.contract.visible_class.clone(),
            ),
        };
        if let Some(mut node) = inner.tree.get_mut(item) {
            if let PageNode::Element(element) = node.value() {
                element.remove_class(&remove);
                element.add_class(&add);
            }
        }
    }

    fn find_control(&self, text: &str) -> Option<PageNodeId> {
        let found = {
            let inner = self.inner.borrow();
            let tag = inner.contract.control_tag.as_str();
            inner
                .tree
                .root()
                .descendants()
                .filter(|node| matches!(node.value(), PageNode::Element(e) if e.tag == tag))
                .find(|node| text_of(*node).contains(text))
                .map(|node| node.id())
        };
        found.map(|id| self.handle(id))
    }

    fn activate(&self, control: PageNodeId) {
        let Some(control) = self.resolve(control) else {
            return;
        };
        let appended = {
            let mut inner = self.inner.borrow_mut();
            inner.activations += 1;
            let is_load_more = inner
                .tree
                .get(control)
                .is_some_and(|node| text_of(node).contains(&inner.contract.load_more_text));
            if is_load_more {
                inner.load_next_page(control)
            } else {
                Vec::new()
            }
        };
        self.notify(appended);
    }

    fn observe_insertions(&self, region: PageNodeId, sink: SessionHandle) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.observers.push(Observer {
            id,
            document: region.document,
            region: region.id,
            sink,
        });
        id
    }

    fn disconnect(&self, subscription: SubscriptionId) {
        self.inner
            .borrow_mut()
            .observers
            .retain(|observer| observer.id != subscription);
    }

    fn render_button(&self, view: &ButtonView, events: &SessionHandle) {
        let mut inner = self.inner.borrow_mut();
        inner.renders.push(view.clone());
        if inner.button.is_some() {
            inner.update_button(view);
            if let Some(button) = inner.button.as_mut() {
                button.view = view.clone();
            }
            return;
        }
        if let Some((node, text)) = inner.inject_button(view) {
            inner.button = Some(InjectedButton {
                node,
                text,
                view: view.clone(),
                events: events.clone(),
            });
        }
    }

    fn remove_button(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(button) = inner.button.take() {
            if let Some(mut node) = inner.tree.get_mut(button.node) {
                node.detach();
            }
        }
    }
}

impl NavigationSource for HtmlPage {
    fn current_url(&self) -> Option<String> {
        Some(self.url())
    }
}

fn button_classes(view: &ButtonView) -> Vec<String> {
    let mut classes = Vec::new();
    if view.show_icon {
        classes.push(ACTIVE_CLASS.to_string());
    }
    if view.busy {
        classes.push(BUSY_CLASS.to_string());
    }
    classes
}

fn parse_document(html: &str) -> Tree<PageNode> {
    let parsed = Html::parse_document(html);
    let mut tree = Tree::new(PageNode::Document);
    {
        let mut root = tree.root_mut();
        for child in parsed.tree.root().children() {
            import_node(&mut root, child);
        }
    }
    tree
}

fn import_node(parent: &mut NodeMut<'_, PageNode>, source: NodeRef<'_, scraper::Node>) -> Option<NodeId> {
    match source.value() {
        scraper::Node::Element(element) => {
            let mut node = parent.append(PageNode::Element(ElementData::from_scraper(element)));
            for child in source.children() {
                import_node(&mut node, child);
            }
            Some(node.id())
        }
        scraper::Node::Text(text) => Some(parent.append(PageNode::Text(str::to_string(text))).id()),
        _ => None,
    }
}

/// Text of a subtree the way a browser renders it: text nodes concatenated
/// as written, whitespace runs collapsed to one space.
fn text_of(node: NodeRef<'_, PageNode>) -> String {
    let raw: String = node
        .descendants()
        .filter_map(|n| match n.value() {
            PageNode::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
