//! Tracker module - the session state machine, its async service and traits.

mod session_tracker;
mod tracker_model;
mod tracker_service;
mod tracker_traits;


#[cfg(test)]
mod tracker_service_tests;

pub use session_tracker::SessionTracker;
pub use tracker_model::{
    ConfirmChoice, Dialog, Field, RunState, SaveOutcome, SavedEntryView, Screen, StartOutcome,
    TrackerSettings, TrackerSnapshot, TrackerView,
};
pub use tracker_service::TrackerService;
pub use tracker_traits::{SnapshotRepositoryTrait, TrackerServiceTrait};
