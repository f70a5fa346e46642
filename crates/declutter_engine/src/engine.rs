use std::collections::VecDeque;
use std::time::Duration;

use declutter_core::{update, Effect, Msg, Navigation, SessionState, SessionView};
use engine_logging::{engine_debug, engine_info, engine_trace, engine_warn};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_util::time::DelayQueue;

use crate::classify::tidy;
use crate::navigation::{NavigationMonitor, Probe, RegionWait};
use crate::{
    ItemStore, NavigationSource, PageDom, PageEvent, PaginationLoader, SessionHandle, Settings,
    TimelineWatcher,
};

/// Work scheduled for later on the session's own loop.
#[derive(Debug)]
enum Deferred {
    RegionProbe { wait: RegionWait },
    ButtonRemoval { navigation: Navigation },
}

enum Wake {
    Event(PageEvent),
    Poll(u64),
    Deferred(Deferred),
}

/// Coordinator for one host page: owns the session state and executes the
/// effects the state machine asks for against the page.
///
/// Everything runs on the caller's task. Host events arrive through the
/// [`SessionHandle`]; the navigation poll and deferred work are multiplexed
/// on the same loop, so a classification pass never interleaves with
/// another one.
pub struct Session<P: PageDom, N: NavigationSource> {
    page: P,
    navigation_source: N,
    settings: Settings,
    loader: PaginationLoader,
    state: SessionState,
    region: Option<P::Node>,
    watcher: TimelineWatcher,
    monitor: NavigationMonitor,
    timers: DelayQueue<Deferred>,
    handle: SessionHandle,
    events: mpsc::UnboundedReceiver<PageEvent>,
    passes: u64,
}

impl<P: PageDom, N: NavigationSource> Session<P, N> {
    pub fn new(page: P, navigation_source: N, settings: Settings) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let monitor = NavigationMonitor::new(settings.timing.poll_period);
        Self {
            page,
            navigation_source,
            settings,
            loader: PaginationLoader::default(),
            state: SessionState::new(),
            region: None,
            watcher: TimelineWatcher::new(),
            monitor,
            timers: DelayQueue::new(),
            handle: SessionHandle::new(tx),
            events,
            passes: 0,
        }
    }

    pub fn with_loader(mut self, loader: PaginationLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn view(&self) -> SessionView {
        self.state.view()
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Whether an insertion subscription is live on the page.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_watching()
    }

    pub fn is_polling(&self) -> bool {
        self.monitor.is_running()
    }

    /// Navigation polls performed so far.
    pub fn poll_ticks(&self) -> u64 {
        self.monitor.ticks()
    }

    /// Classification passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Runs until a shutdown event arrives.
    pub async fn run(&mut self) {
        while let Some(wake) = self.next_wake().await {
            match wake {
                Wake::Event(PageEvent::Shutdown) => {
                    self.teardown();
                    return;
                }
                Wake::Event(event) => self.handle_event(event),
                Wake::Poll(tick) => self.poll_navigation(tick),
                Wake::Deferred(deferred) => self.handle_deferred(deferred),
            }
        }
    }

    /// Runs for at most `duration`. Returns true if the session shut down.
    pub async fn run_for(&mut self, duration: Duration) -> bool {
        tokio::time::timeout(duration, self.run()).await.is_ok()
    }

    /// Drops the subscription, the poll and pending work, and removes the
    /// toggle control.
    pub fn teardown(&mut self) {
        self.watcher.stop(&self.page);
        self.monitor.stop();
        self.timers.clear();
        self.page.remove_button();
        self.region = None;
        self.state = SessionState::new();
        engine_info!("session torn down");
    }

    /// Feeds one message through the state machine and executes the
    /// resulting effects, including follow-up messages they produce.
    pub fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            engine_trace!("msg {:?}", msg);
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                if let Some(next) = self.apply(effect) {
                    inbox.push_back(next);
                }
            }
        }
    }

    async fn next_wake(&mut self) -> Option<Wake> {
        let Self {
            events,
            monitor,
            timers,
            ..
        } = self;
        tokio::select! {
            event = events.recv() => event.map(Wake::Event),
            tick = monitor.tick() => Some(Wake::Poll(tick)),
            Some(expired) = timers.next(), if !timers.is_empty() => {
                Some(Wake::Deferred(expired.into_inner()))
            }
        }
    }

    fn handle_event(&mut self, event: PageEvent) {
        let msg = match event {
            PageEvent::Loaded => Msg::PageLoaded,
            PageEvent::VisibilityChanged { hidden } => Msg::VisibilityChanged { hidden },
            PageEvent::UrlChanged(url) => Msg::UrlObserved(url),
            PageEvent::ToggleClicked => Msg::ToggleClicked,
            PageEvent::Insertions(batch) => Msg::Insertions {
                timeline_items: self.watcher.qualifying_items(&batch),
            },
            PageEvent::Shutdown => return,
        };
        self.dispatch(msg);
    }

    fn poll_navigation(&mut self, tick: u64) {
        engine_logging::set_poll_tick(tick);
        // The common case: cheap string compare, no tree traversal.
        if let Some(url) = self.navigation_source.current_url() {
            self.dispatch(Msg::UrlObserved(url));
        }
    }

    fn handle_deferred(&mut self, deferred: Deferred) {
        match deferred {
            Deferred::RegionProbe { wait } => {
                if wait.navigation() != self.state.navigation() {
                    engine_debug!("dropping region probe for stale navigation {}", wait.navigation());
                    return;
                }
                match wait.probe(&self.page) {
                    Probe::Found(region) => {
                        engine_info!("target region found for {:?}", self.state.current_url());
                        self.region = Some(region);
                        self.dispatch(Msg::RegionFound {
                            navigation: wait.navigation(),
                        });
                    }
                    Probe::Pending => {
                        self.timers.insert(
                            Deferred::RegionProbe { wait },
                            self.settings.timing.settle_probe_interval,
                        );
                    }
                    Probe::TimedOut => {
                        engine_info!("no target region on {:?}", self.state.current_url());
                        self.region = None;
                        self.dispatch(Msg::RegionMissing {
                            navigation: wait.navigation(),
                        });
                    }
                }
            }
            Deferred::ButtonRemoval { navigation } => {
                self.dispatch(Msg::ButtonRemovalDue { navigation });
            }
        }
    }

    fn apply(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::StartPolling => {
                engine_debug!("navigation polling started");
                self.monitor.start();
            }
            Effect::StopPolling => {
                engine_debug!("navigation polling stopped");
                self.monitor.stop();
            }
            Effect::AwaitRegion { navigation } => {
                engine_info!(
                    "navigated to {:?}; waiting for the page to settle",
                    self.state.current_url()
                );
                let wait = RegionWait::new(navigation, &self.settings.timing);
                self.timers.insert(
                    Deferred::RegionProbe { wait },
                    self.settings.timing.settle_delay,
                );
            }
            Effect::Watch => match self.region {
                Some(region) => self.watcher.watch(&self.page, region, self.handle.clone()),
                None => engine_warn!("asked to watch without a target region"),
            },
            Effect::StopWatching => self.watcher.stop(&self.page),
            Effect::RunPass => return Some(self.run_pass()),
            Effect::RevealAll => return Some(self.reveal_all()),
            Effect::RenderButton(view) => {
                engine_debug!("render {:?}", view.label);
                self.page.render_button(&view, &self.handle);
            }
            Effect::ScheduleButtonRemoval { navigation } => {
                self.timers.insert(
                    Deferred::ButtonRemoval { navigation },
                    self.settings.timing.removal_delay,
                );
            }
            Effect::RemoveButton => {
                engine_debug!("removing toggle control");
                self.page.remove_button();
            }
        }
        None
    }

    fn run_pass(&mut self) -> Msg {
        self.passes += 1;
        let outcome = tidy(&self.page, self.region, &self.settings.phrases, &self.loader);
        engine_info!(
            "pass {}: {} items, {} hidden, load more: {}",
            self.passes,
            outcome.examined,
            outcome.hidden,
            outcome.load_more_activated
        );
        Msg::PassCompleted {
            hidden: outcome.hidden,
            load_more_activated: outcome.load_more_activated,
        }
    }

    fn reveal_all(&mut self) -> Msg {
        let store = ItemStore::new(&self.page, self.region);
        let hidden = store.hidden_items();
        for item in &hidden {
            store.show(*item);
        }
        engine_info!("revealed {} items", hidden.len());
        Msg::Revealed {
            previously_hidden: hidden.len(),
        }
    }
}
