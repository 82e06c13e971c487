//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "framegate";

/// Threshold label that applies to any label not listed explicitly.
pub const WILDCARD_LABEL: &str = "*";

/// Number of ranked classifications requested from the inference provider.
pub const CLASSIFICATION_TOP_N: usize = 100;

/// Default trailing window in seconds (0 disables buffering).
pub const DEFAULT_WINDOW_SECONDS: u32 = 0;

/// Default reference name for the frame source.
pub const DEFAULT_CAMERA: &str = "replay";

/// Default reference name for the inference provider.
pub const DEFAULT_VISION: &str = "scores";

/// Default simulated interval between pulls during replay, in milliseconds.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 1000;

/// Longest simulated interval between pulls during replay (one day).
pub const MAX_FRAME_INTERVAL_MS: u64 = 86_400_000;

/// Default number of frames returned per batch pull during replay.
pub const DEFAULT_BATCH_SIZE: usize = 1;

/// File name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Name of the manifest written next to forwarded frames.
pub const MANIFEST_FILE_NAME: &str = "forwarded.csv";

/// Bounds for configured confidence thresholds.
pub mod confidence {
    /// Minimum allowed threshold.
    pub const MIN: f64 = 0.0;

    /// Maximum allowed threshold.
    pub const MAX: f64 = 1.0;
}

/// Image file extensions picked up by the directory frame source.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp"];
