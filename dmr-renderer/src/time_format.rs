//! Playback time formatting

/// Format milliseconds as `MM:SS`
///
/// Both fields are zero-padded to two digits. Non-positive input renders as
/// `"00:00"`. The minute field is never wrapped, so durations of 100 minutes
/// or more render with three or more minute digits.
///
/// ```rust
/// use dmr_renderer::format_duration;
///
/// assert_eq!(format_duration(65_000), "01:05");
/// assert_eq!(format_duration(-5), "00:00");
/// ```
pub fn format_duration(ms: i64) -> String {
    if ms <= 0 {
        return "00:00".to_string();
    }
    let total_secs = ms / 1000;
    let secs = total_secs % 60;
    let mins = total_secs / 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Format `"<position> / <duration>"` as shown after a seek
pub fn format_progress(position_ms: i64, duration_ms: i64) -> String {
    format!(
        "{} / {}",
        format_duration(position_ms),
        format_duration(duration_ms)
    )
}
