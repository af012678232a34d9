use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Seconds in one hour, the unit hourly wages are quoted in
pub const SECONDS_PER_HOUR: Decimal = dec!(3600);

/// Share of a gross target kept after deductions. Targets are entered net
/// and grossed up by dividing by this factor.
pub const NET_SHARE: Decimal = dec!(0.7);

/// Fixed EUR -> USD divisor used for the displayed target
pub const EUR_USD_DIVISOR: Decimal = dec!(0.8);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default tick period in milliseconds
pub const DEFAULT_TICK_MILLIS: u64 = 1000;

/// Label shown for entries saved without a name
pub const UNNAMED_ENTRY_LABEL: &str = "Unnamed";
