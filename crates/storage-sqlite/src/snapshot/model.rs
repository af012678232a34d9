//! Database models for the tracker snapshot.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::errors::StorageError;
use wageclock_core::{Currency, Entry, Target};

/// The target table only ever holds this one row.
pub const TARGET_ROW_ID: i32 = 1;

/// Database model for saved entries
#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EntryDB {
    pub id: String,
    pub name: String,
    pub hourly_wage: String,
    pub elapsed_seconds: i64,
    pub position: i32,
    pub updated_at: NaiveDateTime,
}

/// Database model for the target row
#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::target)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TargetDB {
    pub id: i32,
    pub original_value: String,
    pub currency: String,
    pub updated_at: NaiveDateTime,
}

impl EntryDB {
    pub fn from_domain(
        entry: Entry,
        position: usize,
        updated_at: NaiveDateTime,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            elapsed_seconds: i64::try_from(entry.elapsed_seconds).map_err(|_| {
                StorageError::CorruptRow(format!(
                    "elapsed seconds out of range for entry {}",
                    entry.id
                ))
            })?,
            position: i32::try_from(position)
                .map_err(|_| StorageError::CorruptRow(format!("position {position} too large")))?,
            id: entry.id,
            name: entry.name,
            hourly_wage: entry.hourly_wage.to_string(),
            updated_at,
        })
    }
}

impl TryFrom<EntryDB> for Entry {
    type Error = StorageError;

    fn try_from(db: EntryDB) -> Result<Self, Self::Error> {
        let hourly_wage = Decimal::from_str(&db.hourly_wage).map_err(|e| {
            StorageError::CorruptRow(format!("entry {}: bad hourly wage: {}", db.id, e))
        })?;
        let elapsed_seconds = u64::try_from(db.elapsed_seconds).map_err(|_| {
            StorageError::CorruptRow(format!("entry {}: negative elapsed seconds", db.id))
        })?;
        Ok(Entry {
            id: db.id,
            name: db.name,
            hourly_wage,
            elapsed_seconds,
        })
    }
}

impl TargetDB {
    pub fn from_domain(target: &Target, updated_at: NaiveDateTime) -> Self {
        Self {
            id: TARGET_ROW_ID,
            original_value: target.original_value.to_string(),
            currency: target.currency.as_str().to_string(),
            updated_at,
        }
    }
}

impl TryFrom<TargetDB> for Target {
    type Error = StorageError;

    fn try_from(db: TargetDB) -> Result<Self, Self::Error> {
        let original_value = Decimal::from_str(&db.original_value)
            .map_err(|e| StorageError::CorruptRow(format!("bad target value: {}", e)))?;
        let currency = Currency::from_str(&db.currency)
            .map_err(|e| StorageError::CorruptRow(e.to_string()))?;
        Ok(Target::new(original_value, currency))
    }
}
