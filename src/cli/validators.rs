//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

use crate::constants::confidence;

/// Parse and validate a confidence score (0.0-1.0).
pub fn parse_confidence(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(confidence::MIN..=confidence::MAX).contains(&value) {
        return Err(format!(
            "confidence must be between {} and {}, got {value}",
            confidence::MIN,
            confidence::MAX
        ));
    }

    Ok(value)
}

/// Parse a `LABEL=SCORE` threshold.
///
/// The label is everything before the last `=`, so labels may themselves
/// contain `=`.
pub fn parse_threshold(s: &str) -> Result<(String, f64), String> {
    let (label, score) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("'{s}' is not in LABEL=SCORE form"))?;

    let label = label.trim();
    if label.is_empty() {
        return Err(format!("'{s}' has an empty label"));
    }

    Ok((label.to_string(), parse_confidence(score.trim())?))
}

/// Parse a window length in whole seconds.
pub fn parse_window_seconds(s: &str) -> Result<u32, String> {
    s.parse()
        .map_err(|_| format!("'{s}' is not a whole number of seconds"))
}
