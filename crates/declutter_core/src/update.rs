use crate::{Effect, Msg, RegionState, SessionState, Status};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded | Msg::VisibilityChanged { hidden: false } => {
            // A second foreground signal must not schedule a second poll.
            if state.is_polling() {
                Vec::new()
            } else {
                state.set_polling(true);
                vec![Effect::StartPolling]
            }
        }
        Msg::VisibilityChanged { hidden: true } => {
            if state.is_polling() {
                state.set_polling(false);
                vec![Effect::StopPolling]
            } else {
                Vec::new()
            }
        }
        Msg::UrlObserved(url) => {
            if state.current_url() == Some(url.as_str()) {
                return (state, Vec::new());
            }
            let navigation = state.begin_navigation(url);
            state.mark_dirty();
            vec![Effect::AwaitRegion { navigation }]
        }
        Msg::RegionFound { navigation } => {
            if !is_settling(&state, navigation) {
                return (state, Vec::new());
            }
            state.set_region(RegionState::Attached);
            state.set_watching(true);
            state.mark_dirty();
            vec![Effect::Watch, Effect::RunPass]
        }
        Msg::RegionMissing { navigation } => {
            if !is_settling(&state, navigation) {
                return (state, Vec::new());
            }
            state.set_region(RegionState::Absent);
            state.set_watching(false);
            state.mark_dirty();
            vec![
                Effect::StopWatching,
                Effect::ScheduleButtonRemoval { navigation },
            ]
        }
        Msg::ButtonRemovalDue { navigation } => {
            if navigation != state.navigation() || state.region() != RegionState::Absent {
                return (state, Vec::new());
            }
            if state.take_button().is_some() {
                state.mark_dirty();
                vec![Effect::RemoveButton]
            } else {
                Vec::new()
            }
        }
        Msg::Insertions { timeline_items } => {
            if state.is_watching() && timeline_items > 0 {
                vec![Effect::RunPass]
            } else {
                Vec::new()
            }
        }
        Msg::ToggleClicked => match state.button().map(|button| button.status()) {
            None => Vec::new(),
            Some(Status::Idle) => vec![Effect::RunPass],
            Some(Status::Active | Status::Loading) => vec![Effect::RevealAll],
        },
        Msg::PassCompleted {
            hidden,
            load_more_activated,
        } => {
            // Pagination takes precedence over the active label for this pass.
            let status = if load_more_activated {
                Status::Loading
            } else {
                Status::Active
            };
            let button = state.button_mut();
            button.set_status(status, hidden);
            let view = button.view();
            state.mark_dirty();

            let mut effects = vec![Effect::RenderButton(view)];
            if !load_more_activated && state.is_watching() {
                state.set_watching(false);
                effects.push(Effect::StopWatching);
            }
            effects
        }
        Msg::Revealed { previously_hidden } => {
            if state.button().is_none() {
                return (state, Vec::new());
            }
            let button = state.button_mut();
            button.deactivate(previously_hidden);
            let view = button.view();
            state.mark_dirty();
            vec![Effect::RenderButton(view)]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn is_settling(state: &SessionState, navigation: crate::Navigation) -> bool {
    navigation == state.navigation() && state.region() == RegionState::Settling
}
