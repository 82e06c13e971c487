//! Configuration validation.

use crate::config::{Config, FilterConfig};
use crate::constants::{MAX_FRAME_INTERVAL_MS, confidence};
use crate::error::{Error, Result};
use crate::filter::ThresholdMap;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_filter_config(&config.filter)?;

    if config.replay.batch_size == 0 {
        return Err(Error::ConfigValidation {
            message: "replay.batch_size must be at least 1".to_string(),
        });
    }

    if !(1..=MAX_FRAME_INTERVAL_MS).contains(&config.replay.frame_interval_ms) {
        return Err(Error::ConfigValidation {
            message: format!(
                "replay.frame_interval_ms must be between 1 and {MAX_FRAME_INTERVAL_MS}, got {}",
                config.replay.frame_interval_ms
            ),
        });
    }

    Ok(())
}

/// Validate filter settings: both collaborator references are required and
/// every threshold must lie within the confidence range.
pub fn validate_filter_config(filter: &FilterConfig) -> Result<()> {
    if filter.camera.trim().is_empty() {
        return Err(required("camera"));
    }

    if filter.vision.trim().is_empty() {
        return Err(required("vision"));
    }

    validate_thresholds("classifications", &filter.classifications)?;
    validate_thresholds("objects", &filter.objects)?;

    Ok(())
}

fn required(field: &str) -> Error {
    Error::ConfigValidation {
        message: format!("filter.{field} is required"),
    }
}

fn validate_thresholds(section: &str, thresholds: &ThresholdMap) -> Result<()> {
    for (label, min_score) in thresholds.iter() {
        if label.is_empty() {
            return Err(Error::ConfigValidation {
                message: format!("filter.{section} contains an empty label"),
            });
        }

        if !(confidence::MIN..=confidence::MAX).contains(&min_score) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "filter.{section}.{label} must be between {} and {}, got {min_score}",
                    confidence::MIN,
                    confidence::MAX,
                ),
            });
        }
    }

    Ok(())
}
