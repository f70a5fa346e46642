//! Declutter engine: executes the session state machine against a host page.
mod classify;
mod dom;
mod engine;
mod html_page;
mod items;
mod navigation;
mod pagination;
mod settings;
mod types;
mod watcher;

pub use classify::{classify_items, tidy, PassOutcome};
pub use dom::{NavigationSource, PageContract, PageDom};
pub use engine::Session;
pub use html_page::{HtmlPage, ItemSnapshot, PageNodeId};
pub use items::ItemStore;
pub use navigation::{NavigationMonitor, Probe, RegionWait};
pub use pagination::{PaginationLoader, LOAD_MORE_TEXT};
pub use settings::{load_settings, Settings, SettingsError, Timing};
pub use types::{AddedNode, InsertionBatch, Marker, PageEvent, SessionHandle, SubscriptionId};
pub use watcher::TimelineWatcher;
