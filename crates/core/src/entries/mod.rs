//! Entries module - saved time entries, the in-flight session and earnings.

mod entries_model;

pub use entries_model::{calculate_earnings, Entry, EntryDraft, Session};
