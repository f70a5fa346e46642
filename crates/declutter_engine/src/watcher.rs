use engine_logging::{engine_debug, engine_trace};

use crate::{InsertionBatch, PageDom, SessionHandle, SubscriptionId};

/// Insertion subscription on the target region.
#[derive(Debug, Default)]
pub struct TimelineWatcher {
    subscription: Option<SubscriptionId>,
}

impl TimelineWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_watching(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    /// Subscribes to `region`, replacing any previous subscription.
    pub fn watch<P: PageDom>(&mut self, page: &P, region: P::Node, sink: SessionHandle) {
        self.stop(page);
        let id = page.observe_insertions(region, sink);
        engine_debug!("watching {:?} as {}", region, id);
        self.subscription = Some(id);
    }

    /// Idempotent.
    pub fn stop<P: PageDom>(&mut self, page: &P) {
        if let Some(id) = self.subscription.take() {
            engine_debug!("stopped watching {}", id);
            page.disconnect(id);
        }
    }

    /// Number of inserted timeline items in `batch`, or 0 when the batch
    /// belongs to a subscription that has since been dropped.
    pub fn qualifying_items(&self, batch: &InsertionBatch) -> usize {
        if self.subscription != Some(batch.subscription) {
            engine_trace!("ignoring batch from stale {}", batch.subscription);
            return 0;
        }
        let count = batch.timeline_items();
        if count == 0 {
            engine_trace!(
                "ignoring batch of {} non-timeline insertions",
                batch.added.len()
            );
        }
        count
    }
}
