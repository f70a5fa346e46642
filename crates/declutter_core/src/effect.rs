use crate::{ButtonView, Navigation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the recurring navigation poll.
    StartPolling,
    /// Cancel the recurring navigation poll entirely.
    StopPolling,
    /// Wait for the host page to render, then look up the target region.
    AwaitRegion { navigation: Navigation },
    /// (Re)subscribe to insertions under the located region.
    Watch,
    /// Drop the insertion subscription. Idempotent.
    StopWatching,
    /// Classify every item, then try to continue pagination.
    RunPass,
    /// Mark every hidden item visible.
    RevealAll,
    /// Render the toggle control, creating it if missing.
    RenderButton(ButtonView),
    /// Remove the toggle control after the removal delay.
    ScheduleButtonRemoval { navigation: Navigation },
    /// Remove the toggle control now.
    RemoveButton,
}
