//! Configuration type definitions.

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CAMERA, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_VISION,
    DEFAULT_WINDOW_SECONDS,
};
use crate::filter::ThresholdMap;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter settings.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Replay settings.
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Settings for one filtered camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Name of the frame source to filter.
    pub camera: String,

    /// Name of the inference provider that scores frames.
    pub vision: String,

    /// Trailing window in seconds; 0 disables buffering.
    pub window_seconds: u32,

    /// Minimum classification score per label (`*` for any label).
    pub classifications: ThresholdMap,

    /// Minimum detection score per label (`*` for any label).
    pub objects: ThresholdMap,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            camera: DEFAULT_CAMERA.to_string(),
            vision: DEFAULT_VISION.to_string(),
            window_seconds: DEFAULT_WINDOW_SECONDS,
            classifications: ThresholdMap::new(),
            objects: ThresholdMap::new(),
        }
    }
}

impl FilterConfig {
    /// Trailing window as a duration.
    pub fn window(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.window_seconds))
    }
}

/// Settings for replaying a directory through the filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Simulated time between pulls, in milliseconds.
    pub frame_interval_ms: u64,

    /// Frames returned per batch pull.
    pub batch_size: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_config_defaults() {
        let filter = FilterConfig::default();
        assert_eq!(filter.camera, "replay");
        assert_eq!(filter.vision, "scores");
        assert_eq!(filter.window_seconds, 0);
        assert!(filter.classifications.is_empty());
        assert!(filter.objects.is_empty());
        assert_eq!(filter.window(), TimeDelta::zero());
    }

    #[test]
    fn test_parse_filter_section() {
        let config: Config = toml::from_str(
            r#"
[filter]
camera = "front-door"
vision = "detector"
window_seconds = 10

[filter.classifications]
person = 0.8

[filter.objects]
"*" = 0.5
"#,
        )
        .unwrap();

        assert_eq!(config.filter.camera, "front-door");
        assert_eq!(config.filter.window(), TimeDelta::seconds(10));
        assert_eq!(config.filter.classifications.get("person"), Some(0.8));
        assert_eq!(config.filter.objects.get("*"), Some(0.5));
        assert_eq!(config.replay.batch_size, 1);
    }

    #[test]
    fn test_round_trip_preserves_thresholds() {
        let mut config = Config::default();
        config.filter.classifications.insert("a", 0.8);
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.filter, config.filter);
    }
}
