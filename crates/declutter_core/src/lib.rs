//! Declutter core: pure session state machine, phrase matching and view-model helpers.
mod effect;
mod msg;
mod phrase;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use phrase::{PhraseSet, DEFAULT_PHRASES};
pub use state::{Navigation, RegionState, SessionState};
pub use update::update;
pub use view_model::{ButtonView, SessionView, Status, ToggleButton};
