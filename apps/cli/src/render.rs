//! Plain-text rendering of the tracker view.

use std::fmt::Write;

use rust_decimal::Decimal;
use wageclock_core::constants::DISPLAY_DECIMAL_PRECISION;
use wageclock_core::utils::time_utils::format_duration;
use wageclock_core::{Currency, Dialog, RunState, Screen, StartOutcome, TrackerView};

pub fn format_money(value: Decimal) -> String {
    format!(
        "{:.*}",
        DISPLAY_DECIMAL_PRECISION as usize,
        value.round_dp(DISPLAY_DECIMAL_PRECISION)
    )
}

fn run_state_label(state: RunState) -> &'static str {
    match state {
        RunState::Idle => "idle",
        RunState::Running => "running",
        RunState::Paused => "paused",
    }
}

pub fn render_view(view: &TrackerView) -> String {
    let mut out = String::new();
    match view.screen {
        Screen::TargetSetup => render_target_setup(view, &mut out),
        Screen::Tracking => render_tracking(view, &mut out),
    }
    if let Some(draft) = &view.edit_draft {
        let _ = writeln!(
            out,
            "editing {}: name '{}' wage {}/h {}h {}m",
            draft.entry.id,
            draft.entry.name,
            format_money(draft.entry.hourly_wage),
            draft.hours(),
            draft.minutes()
        );
    }
    match &view.dialog {
        Some(Dialog::SaveOrDiscard) => {
            let _ = writeln!(out, "session stopped: save or discard?");
        }
        Some(Dialog::ConfirmSwitch { entry_id, .. }) => {
            let _ = writeln!(
                out,
                "a session is active; resume {} anyway? confirm keep|save|discard",
                entry_id
            );
        }
        None => {}
    }
    out
}

fn render_target_setup(view: &TrackerView, out: &mut String) {
    let _ = writeln!(
        out,
        "target: {} {} (use 'set target', 'set currency', then 'target set' or 'target skip')",
        format_money(view.target.original_value),
        view.target.currency
    );
}

fn render_tracking(view: &TrackerView, out: &mut String) {
    let session = &view.session;
    let _ = writeln!(
        out,
        "[{}] {}  {}  {}/h  earned {}",
        run_state_label(view.run_state),
        format_duration(session.elapsed_seconds),
        session.display_name(),
        format_money(session.hourly_wage),
        format_money(view.session_earnings)
    );

    if view.target.original_value > Decimal::ZERO {
        let _ = write!(
            out,
            "target {} {}",
            format_money(view.target.original_value),
            view.target.currency
        );
        if view.target.currency == Currency::Eur {
            let _ = write!(out, " (~{} USD)", format_money(view.target.display_value));
        }
        let _ = writeln!(
            out,
            "  total {} / {}{}",
            format_money(view.total_earnings),
            format_money(view.target.comparison_value),
            if view.celebrate { "  REACHED" } else { "" }
        );
    } else {
        let _ = writeln!(out, "total {}", format_money(view.total_earnings));
    }

    if view.saved_entries.is_empty() {
        let _ = writeln!(out, "no saved entries");
        return;
    }
    let _ = writeln!(out, "saved ({}):", format_money(view.saved_earnings));
    for saved in &view.saved_entries {
        let _ = writeln!(
            out,
            "  {}  {}  {}/h  {}  {}",
            saved.entry.id,
            saved.display_name,
            format_money(saved.entry.hourly_wage),
            format_duration(saved.entry.elapsed_seconds),
            format_money(saved.earnings)
        );
    }
}

pub fn render_start_outcome(outcome: &StartOutcome) -> Option<String> {
    match outcome {
        StartOutcome::Started { session_id } => Some(format!("started session {}", session_id)),
        StartOutcome::Cancelled => Some("kept the current session".to_string()),
        StartOutcome::NeedsConfirmation => None,
    }
}
