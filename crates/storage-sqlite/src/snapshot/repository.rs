use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;

use wageclock_core::tracker::SnapshotRepositoryTrait;
use wageclock_core::{Entry, Result, Target, TrackerSnapshot};

use super::model::{EntryDB, TargetDB, TARGET_ROW_ID};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{entries, target};

pub struct SnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SnapshotRepository { pool, writer }
    }

    fn load_snapshot_impl(&self) -> Result<TrackerSnapshot> {
        let mut conn = get_connection(&self.pool)?;

        let entry_rows = entries::table
            .order(entries::position.asc())
            .select(EntryDB::as_select())
            .load::<EntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        let saved_entries = entry_rows
            .into_iter()
            .map(Entry::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let target_row = target::table
            .find(TARGET_ROW_ID)
            .select(TargetDB::as_select())
            .first::<TargetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        let target = match target_row {
            Some(row) => Target::try_from(row)?,
            None => Target::default(),
        };

        debug!("Loaded snapshot with {} saved entries", saved_entries.len());
        Ok(TrackerSnapshot {
            saved_entries,
            target,
        })
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    fn load_snapshot(&self) -> Result<TrackerSnapshot> {
        self.load_snapshot_impl()
    }

    async fn save_snapshot(&self, snapshot: TrackerSnapshot) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let now = Utc::now().naive_utc();
                let rows = snapshot
                    .saved_entries
                    .into_iter()
                    .enumerate()
                    .map(|(position, entry)| EntryDB::from_domain(entry, position, now))
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                diesel::delete(entries::table)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if !rows.is_empty() {
                    diesel::insert_into(entries::table)
                        .values(&rows)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                diesel::replace_into(target::table)
                    .values(&TargetDB::from_domain(&snapshot.target, now))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
