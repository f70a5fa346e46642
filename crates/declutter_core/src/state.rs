use crate::view_model::{SessionView, ToggleButton};

/// Identifies one page identity; bumped on every observed URL change.
pub type Navigation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionState {
    /// No target region on the current page.
    #[default]
    Absent,
    /// URL changed; waiting for the host page to finish rendering.
    Settling,
    /// Region located and classification is running against it.
    Attached,
}

/// The whole mutable session: page context, watcher and poll bookkeeping,
/// and the toggle control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    current_url: Option<String>,
    navigation: Navigation,
    region: RegionState,
    watching: bool,
    polling: bool,
    button: Option<ToggleButton>,
    dirty: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            current_url: self.current_url.clone(),
            navigation: self.navigation,
            region: self.region,
            watching: self.watching,
            polling: self.polling,
            button: self.button.as_ref().map(ToggleButton::view),
            dirty: self.dirty,
        }
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn navigation(&self) -> Navigation {
        self.navigation
    }

    pub fn region(&self) -> RegionState {
        self.region
    }

    pub fn is_watching(&self) -> bool {
        self.watching
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    pub fn button(&self) -> Option<&ToggleButton> {
        self.button.as_ref()
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Records a new URL and starts a new page identity.
    pub(crate) fn begin_navigation(&mut self, url: String) -> Navigation {
        self.current_url = Some(url);
        self.navigation += 1;
        self.region = RegionState::Settling;
        self.navigation
    }

    pub(crate) fn set_region(&mut self, region: RegionState) {
        self.region = region;
    }

    pub(crate) fn set_watching(&mut self, watching: bool) {
        self.watching = watching;
    }

    pub(crate) fn set_polling(&mut self, polling: bool) {
        self.polling = polling;
    }

    /// Lazily creates the control on first status update.
    pub(crate) fn button_mut(&mut self) -> &mut ToggleButton {
        self.button.get_or_insert_with(ToggleButton::default)
    }

    pub(crate) fn take_button(&mut self) -> Option<ToggleButton> {
        self.button.take()
    }
}
