// SPDX-License-Identifier: MPL-2.0
//! `M:SS` time strings for the status line.

/// Formats seconds as `M:SS`.
///
/// Zero, negative and non-finite inputs all render as `0:00`. Minutes are not
/// rolled over into hours.
///
/// # Examples
///
/// ```
/// use spin_deck::domain::time_format::format_time;
///
/// assert_eq!(format_time(0.0), "0:00");
/// assert_eq!(format_time(65.9), "1:05");
/// assert_eq!(format_time(3_725.0), "62:05");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Formats `current / duration` as `M:SS / M:SS`.
#[must_use]
pub fn format_progress(current: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}
