//! Domain events module.
//!
//! The tracker emits events through a [`DomainEventSink`] after state
//! changes. Front ends implement the sink to turn `TargetReached` into an
//! audio cue or similar.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
