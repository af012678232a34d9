//! Terminal side effects for domain events.

use std::io::Write;

use wageclock_core::events::{DomainEvent, DomainEventSink};

const BELL: &[u8] = b"\x07";

/// Rings the terminal bell when the target is reached and logs the other
/// events. Write failures are logged and dropped.
#[derive(Clone, Default)]
pub struct BellSink;

impl BellSink {
    pub fn new() -> Self {
        Self
    }

    fn ring(&self) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(BELL).and_then(|_| stdout.flush()) {
            tracing::warn!("Could not ring the terminal bell: {}", e);
        }
    }
}

impl DomainEventSink for BellSink {
    fn emit(&self, event: DomainEvent) {
        match event {
            DomainEvent::TargetReached {
                total_earnings,
                comparison_value,
                currency,
                ..
            } => {
                tracing::info!(
                    "Target reached: {} earned against {} ({})",
                    total_earnings.round_dp(2),
                    comparison_value.round_dp(2),
                    currency
                );
                self.ring();
            }
            DomainEvent::EntrySaved {
                entry_id,
                kind,
                elapsed_seconds,
            } => {
                tracing::debug!(
                    "Entry {} saved ({:?}, {}s)",
                    entry_id,
                    kind,
                    elapsed_seconds
                );
            }
            DomainEvent::EntryUpdated { entry_id } => {
                tracing::debug!("Entry {} updated", entry_id);
            }
        }
    }
}
