use crate::Navigation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host page finished its initial load.
    PageLoaded,
    /// Tab moved to the background (`hidden`) or back to the foreground.
    VisibilityChanged { hidden: bool },
    /// URL read by a poll tick, or pushed by an event-driven source.
    UrlObserved(String),
    /// Settle wait found the target region.
    RegionFound { navigation: Navigation },
    /// Settle wait timed out without a target region.
    RegionMissing { navigation: Navigation },
    /// Deferred toggle removal is due.
    ButtonRemovalDue { navigation: Navigation },
    /// Insertion batch under the watched region, reduced to the number of
    /// inserted nodes that are timeline items themselves.
    Insertions { timeline_items: usize },
    /// User clicked the toggle control.
    ToggleClicked,
    /// Classification pass finished.
    PassCompleted {
        hidden: usize,
        load_more_activated: bool,
    },
    /// Every hidden item was revealed; `previously_hidden` were flipped.
    Revealed { previously_hidden: usize },
    /// Fallback for placeholder wiring.
    NoOp,
}
