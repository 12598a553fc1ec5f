//! Timestamp tokens as ffmpeg expects them for `-ss`, `-to` and `-t`.
use crate::{Error, Result};
use std::time::Duration;

const MS_PER_SECOND: u128 = 1_000;
const MS_PER_MINUTE: u128 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u128 = 60 * MS_PER_MINUTE;

/// Formats `d` as `HH:MM:SS.mmm`.
///
/// Hours are not wrapped at 24 and sub-millisecond precision is truncated,
/// so `1.9999s` renders as `00:00:01.999`.
pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Formats a signed number of seconds, rejecting values that cannot be a duration.
pub fn format_seconds(secs: f64) -> Result<String> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "duration must be a finite non-negative number of seconds, got {secs}"
        )));
    }
    let d = Duration::try_from_secs_f64(secs)
        .map_err(|e| Error::InvalidArgument(format!("duration {secs}s: {e}")))?;
    Ok(format_duration(d))
}

/// Parses a timestamp back into a [`Duration`].
///
/// Accepts `[HH:]MM:SS[.fff]`, plain seconds like `90` or `1.5` and
/// humantime expressions like `1m 30s`.
pub fn parse_timestamp(s: &str) -> Result<Duration> {
    let s = s.trim();
    let invalid = || Error::InvalidArgument(format!("invalid timestamp {s:?}"));
    if s.is_empty() {
        return Err(invalid());
    }

    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        let (hours, minutes, seconds) = match parts.as_slice() {
            [h, m, sec] => {
                let minutes = parse_digits(m).filter(|m| *m < 60).ok_or_else(invalid)?;
                (parse_digits(h).ok_or_else(invalid)?, minutes, *sec)
            }
            [m, sec] => (0, parse_digits(m).ok_or_else(invalid)?, *sec),
            _ => return Err(invalid()),
        };
        let seconds = parse_seconds(seconds)
            .filter(|d| d.as_secs() < 60)
            .ok_or_else(invalid)?;
        return hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes.checked_mul(60)?))
            .and_then(|secs| Duration::from_secs(secs).checked_add(seconds))
            .ok_or_else(invalid);
    }

    if let Some(d) = parse_seconds(s) {
        return Ok(d);
    }

    humantime::parse_duration(s).map_err(|e| Error::InvalidArgument(format!("invalid timestamp {s:?}: {e}")))
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// `SS` or `SS.fff`, fraction truncated to nanoseconds.
fn parse_seconds(s: &str) -> Option<Duration> {
    let (whole, frac) = match s.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (s, None),
    };
    let secs = parse_digits(whole)?;
    let nanos = match frac {
        None => 0,
        Some(frac) => {
            parse_digits(frac)?;
            let digits = &frac[..frac.len().min(9)];
            let scale = 10u32.pow(9 - digits.len() as u32);
            digits.parse::<u32>().ok()? * scale
        }
    };
    Some(Duration::new(secs, nanos))
}
