//! SQLite storage implementation for Wageclock.
//!
//! This crate holds everything Diesel-related: connection pooling, embedded
//! migrations, the single writer actor and the snapshot repository that
//! implements `wageclock_core::tracker::SnapshotRepositoryTrait`.
//!
//! ```text
//!   wageclock-core (domain, traits)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod snapshot;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use snapshot::SnapshotRepository;

// Re-export from wageclock-core for convenience
pub use wageclock_core::errors::{DatabaseError, Error, Result};
