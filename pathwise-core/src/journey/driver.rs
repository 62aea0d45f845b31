//! Tokio-backed timer driver for hosts without their own event loop.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::careers::CareerPath;
use crate::journey::event::JourneyEvent;
use crate::journey::store::{JourneySnapshot, JourneyStore};
use crate::stage::{JourneyEntry, Stage};

/// Runs a [`JourneyStore`] with real (tokio) timers.
///
/// At most one timer task exists at a time. It is aborted whenever the store
/// reschedules, on [`reset`](Self::reset), and on drop. The store is only
/// reachable through the driver so every mutation re-arms the timer.
#[derive(Debug)]
pub struct JourneyDriver {
    store: Arc<Mutex<JourneyStore>>,
    timer: Option<JoinHandle<()>>,
}

impl JourneyDriver {
    #[must_use]
    pub fn new(store: JourneyStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            timer: None,
        }
    }


    pub async fn start_journey(&mut self, target: JourneyEntry) {
        self.store.lock().await.start_journey(target);
        self.rearm().await;
    }

    pub async fn select_answer(&mut self, question_id: u32, answer: impl Into<String>) {
        self.store.lock().await.select_answer(question_id, answer);
        self.rearm().await;
    }

    pub async fn select_path(&mut self, path: CareerPath) {
        self.store.lock().await.select_path(path);
        self.rearm().await;
    }

    pub async fn reset(&mut self) {
        self.abort_timer();
        self.store.lock().await.reset();
    }

    /// Wait for the pending transition, if any, to land.
    pub async fn settle(&mut self) {
        let Some(handle) = self.timer.take() else {
            return;
        };
        if let Err(err) = handle.await {
            log::warn!("journey timer task ended abnormally: {err}");
        }
    }

    pub async fn stage(&self) -> Stage {
        self.store.lock().await.stage()
    }

    pub async fn snapshot(&self) -> JourneySnapshot {
        self.store.lock().await.snapshot()
    }

    /// Take the events logged since the last drain.
    pub async fn drain_events(&self) -> Vec<JourneyEvent> {
        self.store.lock().await.drain_events()
    }

    async fn rearm(&mut self) {
        self.abort_timer();
        let Some((ticket, delay)) = self.store.lock().await.pending_timer() else {
            return;
        };
        let store = Arc::clone(&self.store);
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.lock().await.fire(ticket);
        }));
    }

    fn abort_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

impl Drop for JourneyDriver {
    fn drop(&mut self) {
        self.abort_timer();
    }
}
