//! Periodic tick scheduling for the running timer.

mod tick_timer;

pub use tick_timer::TickTimer;
