//! Domain event types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::targets::Currency;

/// How a finished session ended up in the saved list.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaveKind {
    /// Added as a new row.
    Appended,
    /// Time was added to an existing row with the same name and wage.
    Merged,
}

/// Domain events emitted by the tracker after state changes.
///
/// Runtime adapters translate them into side effects (an audio cue, a
/// terminal bell, a toast). Emission is best-effort.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Total earnings crossed the target. Emitted once per crossing.
    TargetReached {
        total_earnings: Decimal,
        comparison_value: Decimal,
        currency: Currency,
        reached_at: DateTime<Utc>,
    },

    /// A finished session was recorded.
    EntrySaved {
        entry_id: String,
        kind: SaveKind,
        elapsed_seconds: u64,
    },

    /// A saved entry was edited after the fact.
    EntryUpdated { entry_id: String },
}

impl DomainEvent {
    /// Creates a TargetReached event stamped with the current time.
    pub fn target_reached(
        total_earnings: Decimal,
        comparison_value: Decimal,
        currency: Currency,
    ) -> Self {
        Self::TargetReached {
            total_earnings,
            comparison_value,
            currency,
            reached_at: Utc::now(),
        }
    }

    /// Creates an EntrySaved event.
    pub fn entry_saved(entry_id: String, kind: SaveKind, elapsed_seconds: u64) -> Self {
        Self::EntrySaved {
            entry_id,
            kind,
            elapsed_seconds,
        }
    }

    /// Creates an EntryUpdated event.
    pub fn entry_updated(entry_id: String) -> Self {
        Self::EntryUpdated { entry_id }
    }

    pub fn is_target_reached(&self) -> bool {
        matches!(self, Self::TargetReached { .. })
    }
}
