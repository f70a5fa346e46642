use crate::RegionState;

/// Toggle control status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Noise revealed; the control offers to hide it again.
    Idle,
    /// A classification pass completed.
    #[default]
    Active,
    /// A "Load more" fetch is in flight.
    Loading,
}

/// The singleton toggle control.
///
/// `hidden_count` is only rewritten through [`ToggleButton::set_status`], which
/// ignores the supplied count while idle so the displayed number stays frozen
/// at the value it had when the control was deactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleButton {
    status: Status,
    hidden_count: usize,
}

impl ToggleButton {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden_count
    }

    pub(crate) fn set_status(&mut self, status: Status, hidden_now: usize) {
        self.status = status;
        if status != Status::Idle {
            self.hidden_count = hidden_now;
        }
    }

    /// Moves to idle showing `frozen` until the next non-idle update.
    pub(crate) fn deactivate(&mut self, frozen: usize) {
        self.status = Status::Idle;
        self.hidden_count = frozen;
    }

    pub fn view(&self) -> ButtonView {
        ButtonView::render(self.status, self.hidden_count)
    }
}

/// Deterministic rendering of the control from `(status, hidden_count)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub status: Status,
    pub hidden_count: usize,
    pub label: String,
    /// Active icon shown next to the label.
    pub show_icon: bool,
    /// Busy spinner shown while a page fetch is in flight.
    pub busy: bool,
}

impl ButtonView {
    pub fn render(status: Status, hidden_count: usize) -> Self {
        let events = pluralize_events(hidden_count);
        let label = match status {
            Status::Idle => format!("Click to hide {hidden_count} {events}"),
            Status::Active | Status::Loading => format!("{hidden_count} {events} hidden"),
        };
        Self {
            status,
            hidden_count,
            label,
            show_icon: status != Status::Idle,
            busy: status == Status::Loading,
        }
    }
}

fn pluralize_events(count: usize) -> &'static str {
    if count == 1 {
        "event"
    } else {
        "events"
    }
}

/// Read-only snapshot of the session used by hosts and tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionView {
    pub current_url: Option<String>,
    pub navigation: u64,
    pub region: RegionState,
    pub watching: bool,
    pub polling: bool,
    pub button: Option<ButtonView>,
    pub dirty: bool,
}

impl SessionView {
    pub fn status(&self) -> Option<Status> {
        self.button.as_ref().map(|button| button.status)
    }

    pub fn hidden_count(&self) -> Option<usize> {
        self.button.as_ref().map(|button| button.hidden_count)
    }
}
