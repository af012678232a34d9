//! Wageclock Core - session timer, earnings and target engine.
//!
//! This crate holds the tracker state machine and its pure calculations.
//! It is storage-agnostic: persistence goes through
//! [`tracker::SnapshotRepositoryTrait`], implemented by the
//! `storage-sqlite` crate, and side effects such as the target-reached cue go
//! through [`events::DomainEventSink`].

pub mod constants;
pub mod entries;
pub mod errors;
pub mod events;
pub mod targets;
pub mod ticker;
pub mod tracker;
pub mod utils;

pub use entries::*;
pub use targets::*;
pub use tracker::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
