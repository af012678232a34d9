//! Entry domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{SECONDS_PER_HOUR, UNNAMED_ENTRY_LABEL};
use crate::utils::time_utils::{combine_hours_minutes, split_hours_minutes};

/// Earnings for `elapsed_seconds` of work at `hourly_wage`.
///
/// Equal to `elapsed_seconds / 3600 * hourly_wage`; the multiplication is
/// done first so whole-cent results stay exact. Results beyond the decimal
/// range saturate at `Decimal::MAX`.
pub fn calculate_earnings(elapsed_seconds: u64, hourly_wage: Decimal) -> Decimal {
    if elapsed_seconds == 0 || hourly_wage.is_zero() {
        return Decimal::ZERO;
    }
    let elapsed = Decimal::from(elapsed_seconds);
    elapsed
        .checked_mul(hourly_wage)
        .and_then(|product| product.checked_div(SECONDS_PER_HOUR))
        .or_else(|| {
            elapsed
                .checked_div(SECONDS_PER_HOUR)
                .and_then(|hours| hours.checked_mul(hourly_wage))
        })
        .unwrap_or(if hourly_wage.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        UNNAMED_ENTRY_LABEL
    } else {
        name
    }
}

/// A saved, named block of tracked time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub hourly_wage: Decimal,
    pub elapsed_seconds: u64,
}

impl Entry {
    pub fn earnings(&self) -> Decimal {
        calculate_earnings(self.elapsed_seconds, self.hourly_wage)
    }

    pub fn display_name(&self) -> &str {
        display_name(&self.name)
    }

    /// Entries merge when both name and wage match exactly.
    pub fn matches_key(&self, name: &str, hourly_wage: Decimal) -> bool {
        self.name == name && self.hourly_wage == hourly_wage
    }
}

/// The session currently on the clock.
///
/// `id` stays `None` until the session is first saved, or is pre-assigned
/// when the session was resumed from a saved entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Option<String>,
    pub name: String,
    pub hourly_wage: Decimal,
    pub elapsed_seconds: u64,
}

impl Session {
    /// Fresh zero-duration session carrying the name and wage of `entry`
    /// under a new id.
    pub fn seeded_from(entry: &Entry) -> Self {
        Session {
            id: Some(Uuid::new_v4().to_string()),
            name: entry.name.clone(),
            hourly_wage: entry.hourly_wage,
            elapsed_seconds: 0,
        }
    }

    pub fn earnings(&self) -> Decimal {
        calculate_earnings(self.elapsed_seconds, self.hourly_wage)
    }

    pub fn display_name(&self) -> &str {
        display_name(&self.name)
    }

    /// Converts the session into a saved entry, assigning an id if needed.
    pub fn into_entry(self) -> Entry {
        Entry {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name,
            hourly_wage: self.hourly_wage,
            elapsed_seconds: self.elapsed_seconds,
        }
    }
}

/// Edit-in-progress copy of a saved entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub entry: Entry,
}

impl EntryDraft {
    pub fn new(entry: Entry) -> Self {
        EntryDraft { entry }
    }

    pub fn hours(&self) -> u64 {
        split_hours_minutes(self.entry.elapsed_seconds).0
    }

    pub fn minutes(&self) -> u64 {
        split_hours_minutes(self.entry.elapsed_seconds).1
    }

    /// Sets the hours component, keeping the current minutes. Leftover
    /// seconds are dropped.
    pub fn set_hours(&mut self, hours: u64) {
        self.entry.elapsed_seconds = combine_hours_minutes(hours, self.minutes());
    }

    /// Sets the minutes component, keeping the current hours. Leftover
    /// seconds are dropped.
    pub fn set_minutes(&mut self, minutes: u64) {
        self.entry.elapsed_seconds = combine_hours_minutes(self.hours(), minutes);
    }

    pub fn into_entry(self) -> Entry {
        self.entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(name: &str, wage: Decimal, elapsed: u64) -> Entry {
        Entry {
            id: "e1".to_string(),
            name: name.to_string(),
            hourly_wage: wage,
            elapsed_seconds: elapsed,
        }
    }

    #[test]
    fn test_earnings_formula() {
        assert_eq!(calculate_earnings(3600, dec!(20)), dec!(20));
        assert_eq!(calculate_earnings(1800, dec!(20)), dec!(10));
        assert_eq!(calculate_earnings(90, dec!(40)), dec!(1));
        assert_eq!(calculate_earnings(0, dec!(20)), Decimal::ZERO);
        assert_eq!(calculate_earnings(3600, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_earnings_never_overflow() {
        // elapsed * wage is out of range, elapsed / 3600 * wage is not
        let huge_wage = dec!(50000000000000000000000000000);
        let earned = calculate_earnings(3, huge_wage);
        assert!(earned > dec!(41600000000000000000000000));
        assert!(earned < dec!(41700000000000000000000000));

        assert_eq!(calculate_earnings(u64::MAX, Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn test_display_name_falls_back_to_unnamed() {
        assert_eq!(entry("", dec!(1), 1).display_name(), "Unnamed");
        assert_eq!(entry("Alice", dec!(1), 1).display_name(), "Alice");
        assert_eq!(Session::default().display_name(), "Unnamed");
    }

    #[test]
    fn test_matches_key_compares_wage_by_value() {
        let e = entry("Alice", dec!(20.00), 10);
        assert!(e.matches_key("Alice", dec!(20)));
        assert!(!e.matches_key("Alice", dec!(25)));
        assert!(!e.matches_key("alice", dec!(20)));
    }

    #[test]
    fn test_seeded_session_gets_fresh_id() {
        let saved = entry("Alice", dec!(20), 5400);
        let session = Session::seeded_from(&saved);
        assert_eq!(session.name, "Alice");
        assert_eq!(session.hourly_wage, dec!(20));
        assert_eq!(session.elapsed_seconds, 0);
        assert_ne!(session.id.as_deref(), Some("e1"));
        assert!(session.id.is_some());
    }

    #[test]
    fn test_into_entry_keeps_existing_id() {
        let session = Session {
            id: Some("kept".to_string()),
            ..Session::default()
        };
        assert_eq!(session.into_entry().id, "kept");
        assert!(!Session::default().into_entry().id.is_empty());
    }

    #[test]
    fn test_draft_duration_edits_drop_seconds() {
        // 1h 30m 45s
        let mut draft = EntryDraft::new(entry("Alice", dec!(20), 5445));
        assert_eq!((draft.hours(), draft.minutes()), (1, 30));

        draft.set_hours(2);
        assert_eq!(draft.entry.elapsed_seconds, 2 * 3600 + 30 * 60);

        draft.set_minutes(5);
        assert_eq!(draft.entry.elapsed_seconds, 2 * 3600 + 5 * 60);
    }
}
