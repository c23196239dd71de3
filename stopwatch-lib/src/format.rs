//! Clock-string formatting for elapsed time.

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Display text for zero elapsed time.
pub const ZERO_DISPLAY: &str = "00:00:00:00";

/// Format milliseconds as `H:MM:SS:HH` (hours, minutes, seconds, hundredths).
///
/// Hours are not wrapped at 24. Hundredths are truncated, never rounded, so
/// `999` ms renders as `99`. Each field gets a leading zero only when it is
/// a single digit.
pub fn format_elapsed(ms: u64) -> String {
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let hundredths = (ms % MS_PER_SECOND) / 10;

    format!(
        "{:02}:{:02}:{:02}:{:02}",
        hours, minutes, seconds, hundredths
    )
}
