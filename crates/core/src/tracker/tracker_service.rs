use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};
use tokio::sync::{Mutex, MutexGuard};

use crate::entries::Entry;
use crate::errors::Result;
use crate::events::DomainEventSink;
use crate::ticker::TickTimer;

use super::session_tracker::SessionTracker;
use super::tracker_model::{
    ConfirmChoice, Field, RunState, StartOutcome, TrackerSettings, TrackerView,
};
use super::tracker_traits::{SnapshotRepositoryTrait, TrackerServiceTrait};

/// Runs a [`SessionTracker`] against the wall clock.
///
/// Each operation applies its change and then re-syncs the tick timer while
/// still holding the tracker lock: entering Running arms the timer, leaving
/// it disarms. The tick task only holds a weak reference, so dropping the
/// service ends it.
pub struct TrackerService {
    tracker: Arc<Mutex<SessionTracker>>,
    timer: Mutex<TickTimer>,
    repository: Option<Arc<dyn SnapshotRepositoryTrait>>,
}

impl TrackerService {
    /// Creates the service, restoring saved entries and the target from
    /// `repository` when one is given.
    pub fn new(
        settings: TrackerSettings,
        event_sink: Arc<dyn DomainEventSink>,
        repository: Option<Arc<dyn SnapshotRepositoryTrait>>,
    ) -> Result<Self> {
        let mut tracker = SessionTracker::new(event_sink);
        if let Some(repository) = &repository {
            tracker.restore(repository.load_snapshot()?);
        }

        Ok(TrackerService {
            tracker: Arc::new(Mutex::new(tracker)),
            timer: Mutex::new(TickTimer::new(settings.tick_interval)),
            repository,
        })
    }

    /// Applies `apply` and brings the timer in line with the new run state.
    async fn transition<T>(
        &self,
        apply: impl FnOnce(&mut SessionTracker) -> T,
    ) -> (T, MutexGuard<'_, SessionTracker>) {
        let mut tracker = self.tracker.lock().await;
        let was_running = tracker.run_state() == RunState::Running;
        let out = apply(&mut tracker);
        self.sync_timer(was_running, tracker.run_state()).await;
        (out, tracker)
    }

    async fn sync_timer(&self, was_running: bool, run_state: RunState) {
        let mut timer = self.timer.lock().await;
        if run_state != RunState::Running {
            timer.disarm();
            return;
        }
        if was_running && timer.is_armed() {
            return;
        }

        let tracker = Arc::downgrade(&self.tracker);
        timer.arm(move || {
            let tracker = tracker.clone();
            async move {
                match tracker.upgrade() {
                    Some(tracker) => {
                        tracker.lock().await.tick();
                        true
                    }
                    None => false,
                }
            }
        });
    }

    async fn persist(&self, tracker: &SessionTracker) -> Result<()> {
        let Some(repository) = &self.repository else {
            return Ok(());
        };
        let snapshot = tracker.snapshot();
        debug!(
            "Persisting {} saved entries",
            snapshot.saved_entries.len()
        );
        repository.save_snapshot(snapshot).await.map_err(|e| {
            error!("Failed to persist tracker state: {}", e);
            e
        })
    }

    pub async fn is_ticking(&self) -> bool {
        self.timer.lock().await.is_armed()
    }
}

#[async_trait]
impl TrackerServiceTrait for TrackerService {
    async fn view(&self) -> TrackerView {
        self.tracker.lock().await.view()
    }

    async fn start(&self) -> TrackerView {
        let (_, tracker) = self.transition(|t| t.start()).await;
        tracker.view()
    }

    async fn pause(&self) -> TrackerView {
        let (_, tracker) = self.transition(|t| t.pause()).await;
        tracker.view()
    }

    async fn stop(&self) -> TrackerView {
        let (_, tracker) = self.transition(|t| t.stop()).await;
        tracker.view()
    }

    async fn update_field(&self, field: Field, raw: &str) -> Result<TrackerView> {
        let (result, tracker) = self.transition(|t| t.update_field(field, raw)).await;
        result?;
        Ok(tracker.view())
    }

    async fn save(&self) -> Result<TrackerView> {
        let (_, tracker) = self.transition(|t| t.save()).await;
        self.persist(&tracker).await?;
        Ok(tracker.view())
    }

    async fn discard(&self) -> TrackerView {
        let (_, tracker) = self.transition(|t| t.discard()).await;
        tracker.view()
    }

    async fn start_from_saved(&self, entry_id: &str) -> Result<StartOutcome> {
        let (outcome, _) = self.transition(|t| t.start_from_saved(entry_id)).await;
        outcome
    }

    async fn confirm(&self, choice: ConfirmChoice) -> Result<StartOutcome> {
        let (outcome, tracker) = self.transition(|t| t.confirm(choice)).await;
        if choice == ConfirmChoice::SaveThenStart {
            self.persist(&tracker).await?;
        }
        outcome
    }

    async fn update_entry(&self, entry: Entry) -> Result<TrackerView> {
        let (result, tracker) = self.transition(|t| t.update_entry(entry)).await;
        result?;
        self.persist(&tracker).await?;
        Ok(tracker.view())
    }

    async fn edit_entry(&self, entry_id: &str) -> Result<TrackerView> {
        let (result, tracker) = self.transition(|t| t.edit_entry(entry_id)).await;
        result?;
        Ok(tracker.view())
    }

    async fn update_edit_field(&self, field: Field, raw: &str) -> Result<TrackerView> {
        let (result, tracker) = self
            .transition(|t| t.update_edit_field(field, raw))
            .await;
        result?;
        Ok(tracker.view())
    }

    async fn save_edit(&self) -> Result<TrackerView> {
        let (result, tracker) = self.transition(|t| t.save_edit()).await;
        result?;
        self.persist(&tracker).await?;
        Ok(tracker.view())
    }

    async fn cancel_edit(&self) -> TrackerView {
        let (_, tracker) = self.transition(|t| t.cancel_edit()).await;
        tracker.view()
    }

    async fn set_target(&self) -> Result<TrackerView> {
        let (_, tracker) = self.transition(|t| t.set_target()).await;
        self.persist(&tracker).await?;
        Ok(tracker.view())
    }

    async fn skip_target(&self) -> Result<TrackerView> {
        let (_, tracker) = self.transition(|t| t.skip_target()).await;
        self.persist(&tracker).await?;
        Ok(tracker.view())
    }

    async fn edit_target(&self) -> TrackerView {
        let (_, tracker) = self.transition(|t| t.edit_target()).await;
        tracker.view()
    }

    async fn shutdown(&self) {
        let _tracker = self.tracker.lock().await;
        self.timer.lock().await.disarm();
    }
}
