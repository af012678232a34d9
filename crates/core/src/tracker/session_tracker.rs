use std::sync::Arc;

use log::{debug, info};
use rust_decimal::Decimal;

use crate::entries::{Entry, EntryDraft, Session};
use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink, SaveKind};
use crate::targets::Target;
use crate::utils::input_utils::{parse_decimal_lenient, parse_whole_lenient};

use super::tracker_model::{
    ConfirmChoice, Dialog, Field, RunState, SaveOutcome, SavedEntryView, Screen, StartOutcome,
    TrackerSnapshot, TrackerView,
};

/// Owns the current session, the saved entries and the target.
///
/// Every mutation ends with [`recalculate`](Self::recalculate), which
/// refreshes the celebrate flag and fires `TargetReached` on a false -> true
/// transition only. Invalid transitions are no-ops that return `false`.
///
/// The tracker does no scheduling of its own; something has to call
/// [`tick`](Self::tick) once per second while it is running (see
/// `TrackerService`).
pub struct SessionTracker {
    run_state: RunState,
    screen: Screen,
    dialog: Option<Dialog>,
    session: Session,
    saved_entries: Vec<Entry>,
    target: Target,
    edit_draft: Option<EntryDraft>,
    celebrate: bool,
    event_sink: Arc<dyn DomainEventSink>,
}

impl SessionTracker {
    pub fn new(event_sink: Arc<dyn DomainEventSink>) -> Self {
        SessionTracker {
            run_state: RunState::Idle,
            screen: Screen::TargetSetup,
            dialog: None,
            session: Session::default(),
            saved_entries: Vec::new(),
            target: Target::default(),
            edit_draft: None,
            celebrate: false,
            event_sink,
        }
    }

    /// Replaces the durable state with a loaded snapshot. The celebrate flag
    /// is brought up to date without sounding the cue.
    pub fn restore(&mut self, snapshot: TrackerSnapshot) {
        self.saved_entries = snapshot.saved_entries;
        self.target = snapshot.target;
        self.celebrate = self.target.is_reached_by(self.total_earnings());
        debug!(
            "Restored {} saved entries (target {} {})",
            self.saved_entries.len(),
            self.target.original_value,
            self.target.currency
        );
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            saved_entries: self.saved_entries.clone(),
            target: self.target.clone(),
        }
    }

    // --- Timer transitions ---

    pub fn start(&mut self) -> bool {
        if self.run_state == RunState::Running {
            debug!("Ignoring start: already running");
            return false;
        }
        if self.dialog.is_some() {
            debug!("Ignoring start: a decision is pending");
            return false;
        }
        self.run_state = RunState::Running;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.run_state != RunState::Running {
            debug!("Ignoring pause: not running");
            return false;
        }
        self.run_state = RunState::Paused;
        true
    }

    /// Stops the clock and opens the save-or-discard prompt. The session is
    /// kept until the user decides.
    pub fn stop(&mut self) -> bool {
        if self.run_state == RunState::Idle {
            debug!("Ignoring stop: nothing on the clock");
            return false;
        }
        self.run_state = RunState::Idle;
        self.dialog = Some(Dialog::SaveOrDiscard);
        true
    }

    /// Adds one second to a running session.
    pub fn tick(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        self.session.elapsed_seconds = self.session.elapsed_seconds.saturating_add(1);
        self.recalculate();
        true
    }

    // --- Form input ---

    /// Applies raw form input to the session or the target. Numbers that do
    /// not parse become zero.
    pub fn update_field(&mut self, field: Field, raw: &str) -> Result<()> {
        match field {
            Field::Name => self.session.name = raw.to_string(),
            Field::HourlyWage => self.session.hourly_wage = parse_decimal_lenient(raw),
            Field::OriginalValue => self.target.original_value = parse_decimal_lenient(raw),
            Field::Currency => self.target.currency = raw.parse()?,
            Field::Hours | Field::Minutes => {
                return Err(ValidationError::FieldNotEditable(field.as_str().to_string()).into())
            }
        }
        self.recalculate();
        Ok(())
    }

    // --- Save / discard ---

    /// Records the session and resets it.
    ///
    /// A zero-duration session only closes the prompt. Otherwise the session
    /// merges into a saved entry with the same name and wage (keeping that
    /// entry's id) or is appended as a new entry.
    pub fn save(&mut self) -> SaveOutcome {
        self.dialog = None;
        self.run_state = RunState::Idle;

        if self.session.elapsed_seconds == 0 {
            debug!("Nothing to save: session has no tracked time");
            return SaveOutcome::Discarded;
        }

        let session = std::mem::take(&mut self.session);
        let elapsed = session.elapsed_seconds;

        let (entry_id, kind) = match self
            .saved_entries
            .iter_mut()
            .find(|e| e.matches_key(&session.name, session.hourly_wage))
        {
            Some(existing) => {
                existing.elapsed_seconds = existing.elapsed_seconds.saturating_add(elapsed);
                info!(
                    "Merged {}s into entry '{}' ({})",
                    elapsed,
                    existing.display_name(),
                    existing.id
                );
                (existing.id.clone(), SaveKind::Merged)
            }
            None => {
                let entry = session.into_entry();
                info!(
                    "Saved new entry '{}' ({}) with {}s",
                    entry.display_name(),
                    entry.id,
                    elapsed
                );
                let id = entry.id.clone();
                self.saved_entries.push(entry);
                (id, SaveKind::Appended)
            }
        };

        self.event_sink
            .emit(DomainEvent::entry_saved(entry_id.clone(), kind, elapsed));
        self.recalculate();
        SaveOutcome::Saved { entry_id, kind }
    }

    /// Throws the session away. Saved entries are untouched.
    pub fn discard(&mut self) {
        if self.session.elapsed_seconds > 0 {
            debug!("Discarding {}s session", self.session.elapsed_seconds);
        }
        self.session = Session::default();
        self.dialog = None;
        self.run_state = RunState::Idle;
        self.recalculate();
    }

    // --- Resume from saved ---

    /// Whether replacing the session would lose tracked work.
    pub fn has_active_session(&self) -> bool {
        match self.run_state {
            RunState::Running => true,
            RunState::Paused => self.session.elapsed_seconds > 0,
            RunState::Idle => {
                self.dialog == Some(Dialog::SaveOrDiscard) && self.session.elapsed_seconds > 0
            }
        }
    }

    /// Starts a fresh session with the name and wage of a saved entry.
    ///
    /// If an active session is in the way nothing changes except that a
    /// `ConfirmSwitch` dialog opens.
    pub fn start_from_saved(&mut self, entry_id: &str) -> Result<StartOutcome> {
        let entry = self.find_entry(entry_id)?.clone();

        if self.has_active_session() {
            let resume_save_prompt = self.dialog == Some(Dialog::SaveOrDiscard);
            self.dialog = Some(Dialog::ConfirmSwitch {
                entry_id: entry.id,
                resume_save_prompt,
            });
            return Ok(StartOutcome::NeedsConfirmation);
        }

        Ok(self.begin_from(&entry))
    }

    /// Resolves a pending `ConfirmSwitch` dialog.
    pub fn confirm(&mut self, choice: ConfirmChoice) -> Result<StartOutcome> {
        let (entry_id, resume_save_prompt) = match &self.dialog {
            Some(Dialog::ConfirmSwitch {
                entry_id,
                resume_save_prompt,
            }) => (entry_id.clone(), *resume_save_prompt),
            _ => {
                debug!("Ignoring confirmation: nothing to confirm");
                return Ok(StartOutcome::Cancelled);
            }
        };

        if choice == ConfirmChoice::KeepCurrent {
            self.dialog = resume_save_prompt.then_some(Dialog::SaveOrDiscard);
            return Ok(StartOutcome::Cancelled);
        }

        let entry = self.find_entry(&entry_id)?.clone();
        match choice {
            ConfirmChoice::SaveThenStart => {
                self.save();
            }
            ConfirmChoice::DiscardThenStart => self.discard(),
            ConfirmChoice::KeepCurrent => {}
        }
        Ok(self.begin_from(&entry))
    }

    fn begin_from(&mut self, entry: &Entry) -> StartOutcome {
        self.session = Session::seeded_from(entry);
        self.dialog = None;
        self.run_state = RunState::Running;
        self.recalculate();

        let session_id = self.session.id.clone().unwrap_or_default();
        info!(
            "Started session {} from entry '{}'",
            session_id,
            entry.display_name()
        );
        StartOutcome::Started { session_id }
    }

    // --- Editing saved entries ---

    /// Replaces the saved entry that has the same id. Negative wages are
    /// rejected.
    pub fn update_entry(&mut self, updated: Entry) -> Result<()> {
        if updated.hourly_wage < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "hourly wage must not be negative, got {}",
                updated.hourly_wage
            ))
            .into());
        }
        let slot = self
            .saved_entries
            .iter_mut()
            .find(|e| e.id == updated.id)
            .ok_or_else(|| Error::EntryNotFound(updated.id.clone()))?;
        *slot = updated;

        self.event_sink
            .emit(DomainEvent::entry_updated(slot.id.clone()));
        self.recalculate();
        Ok(())
    }

    pub fn edit_entry(&mut self, entry_id: &str) -> Result<()> {
        let entry = self.find_entry(entry_id)?.clone();
        self.edit_draft = Some(EntryDraft::new(entry));
        Ok(())
    }

    /// Applies raw input to the open edit draft. Duration is edited through
    /// `Hours` and `Minutes`.
    pub fn update_edit_field(&mut self, field: Field, raw: &str) -> Result<()> {
        let draft = self.edit_draft.as_mut().ok_or(Error::NoActiveEdit)?;
        match field {
            Field::Name => draft.entry.name = raw.to_string(),
            Field::HourlyWage => draft.entry.hourly_wage = parse_decimal_lenient(raw),
            Field::Hours => draft.set_hours(parse_whole_lenient(raw)),
            Field::Minutes => draft.set_minutes(parse_whole_lenient(raw)),
            Field::OriginalValue | Field::Currency => {
                return Err(ValidationError::FieldNotEditable(field.as_str().to_string()).into())
            }
        }
        Ok(())
    }

    pub fn save_edit(&mut self) -> Result<()> {
        let draft = self.edit_draft.take().ok_or(Error::NoActiveEdit)?;
        self.update_entry(draft.into_entry())
    }

    pub fn cancel_edit(&mut self) {
        self.edit_draft = None;
    }

    // --- Target screens ---

    /// Keeps the entered target and moves on to tracking.
    pub fn set_target(&mut self) {
        self.screen = Screen::Tracking;
        self.recalculate();
    }

    /// Clears the target and moves on to tracking.
    pub fn skip_target(&mut self) {
        self.target = Target::none();
        self.screen = Screen::Tracking;
        self.recalculate();
    }

    /// Back to target entry. Session and saved entries are kept.
    pub fn edit_target(&mut self) {
        self.screen = Screen::TargetSetup;
    }

    // --- Derived state ---

    /// Re-evaluates the celebrate flag and sounds the cue on a rising edge.
    pub fn recalculate(&mut self) -> bool {
        let total = self.total_earnings();
        let reached = self.target.is_reached_by(total);

        if reached && !self.celebrate {
            let comparison = self.target.comparison_value();
            info!("Target reached: {} >= {}", total, comparison);
            self.event_sink.emit(DomainEvent::target_reached(
                total,
                comparison,
                self.target.currency,
            ));
        }
        self.celebrate = reached;
        reached
    }

    pub fn session_earnings(&self) -> Decimal {
        self.session.earnings()
    }

    pub fn saved_earnings(&self) -> Decimal {
        self.saved_entries
            .iter()
            .map(Entry::earnings)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn total_earnings(&self) -> Decimal {
        self.saved_earnings()
            .saturating_add(self.session_earnings())
    }

    // --- Accessors ---

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn saved_entries(&self) -> &[Entry] {
        &self.saved_entries
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn edit_draft(&self) -> Option<&EntryDraft> {
        self.edit_draft.as_ref()
    }

    pub fn celebrate(&self) -> bool {
        self.celebrate
    }

    pub fn view(&self) -> TrackerView {
        TrackerView {
            run_state: self.run_state,
            screen: self.screen,
            dialog: self.dialog.clone(),
            session: self.session.clone(),
            saved_entries: self
                .saved_entries
                .iter()
                .map(|entry| SavedEntryView {
                    entry: entry.clone(),
                    display_name: entry.display_name().to_string(),
                    earnings: entry.earnings(),
                })
                .collect(),
            target: self.target.view(),
            celebrate: self.celebrate,
            session_earnings: self.session_earnings(),
            saved_earnings: self.saved_earnings(),
            total_earnings: self.total_earnings(),
            edit_draft: self.edit_draft.clone(),
        }
    }

    fn find_entry(&self, entry_id: &str) -> Result<&Entry> {
        self.saved_entries
            .iter()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| Error::EntryNotFound(entry_id.to_string()))
    }
}
