const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Formats a duration in seconds as `HH:MM:SS`.
///
/// Hours are zero-padded to two digits but never truncated, so a 100 hour
/// entry renders as `100:00:00`.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Splits a duration into whole hours and the remaining whole minutes.
/// Sub-minute seconds are not part of the result.
pub fn split_hours_minutes(total_seconds: u64) -> (u64, u64) {
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    (hours, minutes)
}

/// Recombines hours and minutes into seconds.
pub fn combine_hours_minutes(hours: u64, minutes: u64) -> u64 {
    hours
        .saturating_mul(SECONDS_PER_HOUR)
        .saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE))
}
