//! Tracker state and read models.

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TICK_MILLIS;
use crate::entries::{Entry, EntryDraft, Session};
use crate::errors::{Error, Result, ValidationError};
use crate::events::SaveKind;
use crate::targets::{Target, TargetView};

/// Timer state of the current session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Which of the two screens is showing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    #[default]
    TargetSetup,
    Tracking,
}

/// A decision the user has to make before tracking continues
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Dialog {
    /// Shown after stop: keep the stopped session or throw it away.
    SaveOrDiscard,
    /// Shown when resuming a saved entry would replace an active session.
    #[serde(rename_all = "camelCase")]
    ConfirmSwitch {
        entry_id: String,
        /// The save prompt was open before; `KeepCurrent` brings it back.
        resume_save_prompt: bool,
    },
}

/// Answers to [`Dialog::ConfirmSwitch`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConfirmChoice {
    KeepCurrent,
    SaveThenStart,
    DiscardThenStart,
}

impl FromStr for ConfirmChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "keep" | "keepCurrent" | "keep-current" => Ok(ConfirmChoice::KeepCurrent),
            "save" | "saveThenStart" | "save-then-start" => Ok(ConfirmChoice::SaveThenStart),
            "discard" | "discardThenStart" | "discard-then-start" => {
                Ok(ConfirmChoice::DiscardThenStart)
            }
            other => Err(ValidationError::InvalidInput(format!(
                "unknown confirmation choice '{}'",
                other
            ))
            .into()),
        }
    }
}

/// Form fields the presentation layer can change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    HourlyWage,
    OriginalValue,
    Currency,
    Hours,
    Minutes,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::HourlyWage => "hourlyWage",
            Field::OriginalValue => "originalValue",
            Field::Currency => "currency",
            Field::Hours => "hours",
            Field::Minutes => "minutes",
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "name" => Ok(Field::Name),
            "hourlyWage" | "hourly_wage" | "wage" => Ok(Field::HourlyWage),
            "originalValue" | "original_value" | "target" => Ok(Field::OriginalValue),
            "currency" => Ok(Field::Currency),
            "hours" => Ok(Field::Hours),
            "minutes" => Ok(Field::Minutes),
            other => Err(ValidationError::UnknownField(other.to_string()).into()),
        }
    }
}

/// Result of [`SessionTracker::save`](super::SessionTracker::save)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing was on the clock; the prompt closed without recording.
    Discarded,
    Saved { entry_id: String, kind: SaveKind },
}

/// Result of resuming a saved entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// A fresh session is running under `session_id`.
    Started { session_id: String },
    /// An active session is in the way; a `ConfirmSwitch` dialog is open.
    NeedsConfirmation,
    /// The user kept the current session.
    Cancelled,
}

/// Runtime settings for the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSettings {
    pub tick_interval: Duration,
}

impl TrackerSettings {
    pub fn with_tick_interval(tick_interval: Duration) -> Result<Self> {
        if tick_interval.is_zero() {
            return Err(Error::InvalidConfigValue(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        Ok(TrackerSettings { tick_interval })
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        TrackerSettings {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MILLIS),
        }
    }
}

/// The durable part of the tracker: saved entries and the target
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSnapshot {
    pub saved_entries: Vec<Entry>,
    pub target: Target,
}

/// A saved entry with its derived fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedEntryView {
    pub entry: Entry,
    pub display_name: String,
    pub earnings: Decimal,
}

/// Everything the presentation layer renders, recomputed on every call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerView {
    pub run_state: RunState,
    pub screen: Screen,
    pub dialog: Option<Dialog>,
    pub session: Session,
    pub saved_entries: Vec<SavedEntryView>,
    pub target: TargetView,
    pub celebrate: bool,
    pub session_earnings: Decimal,
    pub saved_earnings: Decimal,
    pub total_earnings: Decimal,
    pub edit_draft: Option<EntryDraft>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_from_form() {
        assert_eq!("name".parse::<Field>().unwrap(), Field::Name);
        assert_eq!("hourlyWage".parse::<Field>().unwrap(), Field::HourlyWage);
        assert_eq!(
            "originalValue".parse::<Field>().unwrap(),
            Field::OriginalValue
        );
        assert_eq!("minutes".parse::<Field>().unwrap(), Field::Minutes);
        assert!(matches!(
            "salary".parse::<Field>(),
            Err(Error::Validation(ValidationError::UnknownField(_)))
        ));
    }

    #[test]
    fn test_field_round_trips_through_as_str() {
        for field in [
            Field::Name,
            Field::HourlyWage,
            Field::OriginalValue,
            Field::Currency,
            Field::Hours,
            Field::Minutes,
        ] {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_confirm_choice_parsing() {
        assert_eq!(
            "keep".parse::<ConfirmChoice>().unwrap(),
            ConfirmChoice::KeepCurrent
        );
        assert_eq!(
            "save-then-start".parse::<ConfirmChoice>().unwrap(),
            ConfirmChoice::SaveThenStart
        );
        assert!("maybe".parse::<ConfirmChoice>().is_err());
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        assert!(TrackerSettings::with_tick_interval(Duration::ZERO).is_err());
        assert_eq!(
            TrackerSettings::default().tick_interval,
            Duration::from_secs(1)
        );
    }
}
