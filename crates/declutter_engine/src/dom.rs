use std::fmt;

use declutter_core::ButtonView;

use crate::{Marker, SessionHandle, SubscriptionId};

/// Adapter over the host page tree.
///
/// The host owns the tree; implementations hand out copyable node references
/// that may go stale when the host replaces content. Every method must
/// tolerate a stale reference by doing nothing (or returning empty results).
pub trait PageDom {
    type Node: Copy + Eq + fmt::Debug;

    /// The watched region, if the current page has one.
    fn find_region(&self) -> Option<Self::Node>;

    /// Every timeline item under `region`, whichever marker it carries, in
    /// document order.
    fn query_items(&self, region: Self::Node) -> Vec<Self::Node>;

    /// Rendered text of an item, used for phrase matching.
    fn item_text(&self, item: Self::Node) -> String;

    fn marker(&self, item: Self::Node) -> Option<Marker>;

    /// Swaps the marker classes in one step: the other marker is removed and
    /// `marker` added.
    fn set_marker(&self, item: Self::Node, marker: Marker);

    /// First interactive control in document order whose text contains `text`.
    fn find_control(&self, text: &str) -> Option<Self::Node>;

    /// Programmatically clicks a control.
    fn activate(&self, control: Self::Node);

    /// Starts delivering child-list insertion batches under `region`
    /// through `sink`.
    fn observe_insertions(&self, region: Self::Node, sink: SessionHandle) -> SubscriptionId;

    /// Ends a subscription. Unknown ids are ignored.
    fn disconnect(&self, subscription: SubscriptionId);

    /// Renders the toggle control at the attachment point, creating it if
    /// missing. Clicks are reported through `events`.
    fn render_button(&self, view: &ButtonView, events: &SessionHandle);

    fn remove_button(&self);
}

/// Where the URL that identifies the current page comes from.
pub trait NavigationSource {
    /// Current URL, or `None` if this source does not support polling and
    /// pushes changes through [`SessionHandle::url_changed`] instead.
    fn current_url(&self) -> Option<String>;
}

/// The class names and texts the host page exposes. Treated as a fixed
/// external contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContract {
    pub region_class: String,
    pub visible_class: String,
    pub hidden_class: String,
    /// Identifies a timeline item independently of its hide/show marker.
    pub timeline_item_class: String,
    pub control_tag: String,
    pub load_more_text: String,
    pub button_id: String,
}

impl Default for PageContract {
    fn default() -> Self {
        Self {
            region_class: "pull-discussion-timeline".to_string(),
            visible_class: "TimelineItem".to_string(),
            hidden_class: "TimelineItem-Noise".to_string(),
            timeline_item_class: "js-timeline-item".to_string(),
            control_tag: "button".to_string(),
            load_more_text: "Load more".to_string(),
            button_id: "pr-noise-button".to_string(),
        }
    }
}
