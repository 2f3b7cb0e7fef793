// Duration parsing
//
// Devices report elapsed time as compound unit tokens (`1w2d3h4m5s`), and
// some firmware appends a clock component instead of h/m/s (`1d02:03:04`).
// Unit tokens go through `humantime`; the clock tail is handled here.

use std::time::Duration;

use crate::error::ParseError;

/// Convert a device duration string into seconds.
///
/// Accepts `w`, `d`, `h`, `m`, `s` and `ms` tokens in any combination, with
/// or without whitespace between them, optionally followed by an
/// `HH:MM:SS` clock. Never panics; every malformed input is a [`ParseError`].
pub fn parse_duration(raw: &str) -> Result<f64, ParseError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    let (units, clock) = split_clock(input);
    let mut total = Duration::ZERO;

    if !units.trim().is_empty() {
        let parsed = humantime::parse_duration(units).map_err(|source| ParseError::Duration {
            input: input.to_owned(),
            source,
        })?;
        total += parsed;
    }

    if let Some(clock) = clock {
        let parsed = parse_clock(clock).ok_or_else(|| ParseError::Clock {
            input: input.to_owned(),
        })?;
        total = total.checked_add(parsed).ok_or_else(|| ParseError::Clock {
            input: input.to_owned(),
        })?;
    }

    Ok(total.as_secs_f64())
}

/// Split `1d02:03:04` into (`1d`, `02:03:04`). Inputs without a colon have
/// no clock part.
fn split_clock(input: &str) -> (&str, Option<&str>) {
    if !input.contains(':') {
        return (input, None);
    }
    match input.rfind(|c: char| c.is_ascii_alphabetic()) {
        Some(idx) => {
            let (units, clock) = input.split_at(idx + 1);
            (units, Some(clock))
        }
        None => ("", Some(input)),
    }
}

/// `HH:MM:SS`, each field plain decimal digits.
fn parse_clock(clock: &str) -> Option<Duration> {
    let fields: Vec<&str> = clock.trim().split(':').collect();
    if fields.len() != 3 {
        return None;
    }

    let mut secs: u64 = 0;
    for field in fields {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: u64 = field.parse().ok()?;
        secs = secs.checked_mul(60)?.checked_add(value)?;
    }
    Some(Duration::from_secs(secs))
}
