use std::time::Duration;

/// Formats a duration as `H:MM:SS`, the way track lengths are listed.
///
/// Hours are not wrapped into days, so a long libretto reads `25:00:00`.
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}
