use engine_logging::engine_debug;

use crate::PageDom;

/// Text of the host's pagination control.
pub const LOAD_MORE_TEXT: &str = "Load more";

/// Clicks the host page's "load more" control when one is present.
#[derive(Debug, Clone)]
pub struct PaginationLoader {
    control_text: String,
}

impl PaginationLoader {
    pub fn new(control_text: impl Into<String>) -> Self {
        Self {
            control_text: control_text.into(),
        }
    }

    /// Returns true if a control was found and activated. Items it loads
    /// arrive later as insertion batches.
    pub fn load_more_if_available<P: PageDom>(&self, page: &P) -> bool {
        match page.find_control(&self.control_text) {
            Some(control) => {
                engine_debug!("activating {:?} ({:?})", control, self.control_text);
                page.activate(control);
                true
            }
            None => false,
        }
    }
}

impl Default for PaginationLoader {
    fn default() -> Self {
        Self::new(LOAD_MORE_TEXT)
    }
}
