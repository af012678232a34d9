use async_trait::async_trait;

use crate::entries::Entry;
use crate::errors::Result;

use super::tracker_model::{ConfirmChoice, Field, StartOutcome, TrackerSnapshot, TrackerView};

/// Trait for persisting the durable tracker state
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Loads saved entries (in insertion order) and the target. An empty
    /// store yields the default snapshot.
    fn load_snapshot(&self) -> Result<TrackerSnapshot>;

    /// Replaces everything stored with `snapshot`.
    async fn save_snapshot(&self, snapshot: TrackerSnapshot) -> Result<()>;
}

/// Trait for the tracker service consumed by front ends
#[async_trait]
pub trait TrackerServiceTrait: Send + Sync {
    async fn view(&self) -> TrackerView;

    async fn start(&self) -> TrackerView;
    async fn pause(&self) -> TrackerView;
    async fn stop(&self) -> TrackerView;

    async fn update_field(&self, field: Field, raw: &str) -> Result<TrackerView>;
    async fn save(&self) -> Result<TrackerView>;
    async fn discard(&self) -> TrackerView;

    async fn start_from_saved(&self, entry_id: &str) -> Result<StartOutcome>;
    async fn confirm(&self, choice: ConfirmChoice) -> Result<StartOutcome>;

    async fn update_entry(&self, entry: Entry) -> Result<TrackerView>;
    async fn edit_entry(&self, entry_id: &str) -> Result<TrackerView>;
    async fn update_edit_field(&self, field: Field, raw: &str) -> Result<TrackerView>;
    async fn save_edit(&self) -> Result<TrackerView>;
    async fn cancel_edit(&self) -> TrackerView;

    async fn set_target(&self) -> Result<TrackerView>;
    async fn skip_target(&self) -> Result<TrackerView>;
    async fn edit_target(&self) -> TrackerView;

    /// Stops ticking for good.
    async fn shutdown(&self);
}
