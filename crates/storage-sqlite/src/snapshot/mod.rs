//! SQLite storage for the tracker snapshot: saved entries and the target.

mod model;
mod repository;

pub use model::{EntryDB, TargetDB, TARGET_ROW_ID};
pub use repository::SnapshotRepository;
