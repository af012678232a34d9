//! Targets module - earnings goal with currency-aware derived values.

mod target_model;

pub use target_model::{Currency, Target, TargetView};
