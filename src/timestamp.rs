//! Conversion between seconds and `H:MM:SS` display timestamps.
//!
//! The matcher renders segment boundaries with [`to_display`]; the URL
//! builder goes the other way with [`to_seconds`] to produce a `t=` parameter.

use crate::error::{Result, VidseekError};

/// Format seconds as `H:MM:SS` (`HH:MM:SS` from ten hours on).
///
/// Sub-second precision is truncated, never rounded. Negative input is not
/// supported.
pub fn to_display(seconds: f64) -> String {
    let total_seconds = seconds.trunc() as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    format!("{}:{:02}:{:02}", hours, minutes, secs)
}

/// Parse an `M:S` or `H:M:S` timestamp into whole seconds.
pub fn to_seconds(display: &str) -> Result<u64> {
    let fields = display
        .split(':')
        .map(|field| parse_field(field, display))
        .collect::<Result<Vec<u64>>>()?;

    let (hours, minutes, seconds) = match fields.as_slice() {
        [m, s] => (0, *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => {
            return Err(VidseekError::Format(format!(
                "'{}' must have 2 or 3 colon-separated fields (M:S or H:M:S)",
                display
            )))
        }
    };

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| VidseekError::Format(format!("'{}' is out of range", display)))
}

fn parse_field(field: &str, display: &str) -> Result<u64> {
    field.trim().parse::<u64>().map_err(|_| {
        VidseekError::Format(format!(
            "'{}' contains a non-numeric field '{}'",
            display, field
        ))
    })
}

/// Build a playback URL that starts at `timestamp`.
///
/// `base` is the watch page, e.g. `https://www.youtube.com/watch`.
pub fn playback_url(base: &str, video_id: &str, timestamp: &str) -> Result<String> {
    let seconds = to_seconds(timestamp)?;
    Ok(format!("{}?v={}&t={}s", base, video_id, seconds))
}
