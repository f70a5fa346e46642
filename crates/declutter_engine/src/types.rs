use std::fmt;

use tokio::sync::mpsc;

/// Hide/show classification marker of a timeline item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Signal: left visible.
    Visible,
    /// Noise: hidden from view.
    Hidden,
}

/// Identifies one insertion subscription handed out by a [`crate::PageDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedNode {
    /// Carries the host's timeline-item marker class itself (not merely a descendant).
    pub timeline_item: bool,
}

/// One batch of child-list insertions under an observed region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionBatch {
    pub subscription: SubscriptionId,
    pub added: Vec<AddedNode>,
}

impl InsertionBatch {
    pub fn timeline_items(&self) -> usize {
        self.added.iter().filter(|node| node.timeline_item).count()
    }
}

/// Everything the host page can tell a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Loaded,
    VisibilityChanged { hidden: bool },
    /// Pushed by hosts that report navigation instead of being polled.
    UrlChanged(String),
    ToggleClicked,
    Insertions(InsertionBatch),
    Shutdown,
}

/// Cloneable sender side of a session's event queue.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<PageEvent>,
}

impl SessionHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<PageEvent>) -> Self {
        Self { tx }
    }

    /// Returns false once the session has gone away.
    pub fn send(&self, event: PageEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn page_loaded(&self) -> bool {
        self.send(PageEvent::Loaded)
    }

    pub fn visibility_changed(&self, hidden: bool) -> bool {
        self.send(PageEvent::VisibilityChanged { hidden })
    }

    pub fn url_changed(&self, url: impl Into<String>) -> bool {
        self.send(PageEvent::UrlChanged(url.into()))
    }

    pub fn toggle_clicked(&self) -> bool {
        self.send(PageEvent::ToggleClicked)
    }

    pub fn insertions(&self, batch: InsertionBatch) -> bool {
        self.send(PageEvent::Insertions(batch))
    }

    pub fn shutdown(&self) -> bool {
        self.send(PageEvent::Shutdown)
    }
}
