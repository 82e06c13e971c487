//! Error types for framegate.

/// Result type alias for framegate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for framegate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// A configured collaborator reference could not be resolved.
    #[error("{kind} '{name}' not found in dependencies")]
    DependencyNotFound {
        /// Kind of dependency ("camera" or "vision service").
        kind: &'static str,
        /// Configured reference name.
        name: String,
    },

    /// The frame source failed to produce frames.
    #[error("frame source failed: {reason}")]
    FrameSource {
        /// Description of the failure.
        reason: String,
    },

    /// The frame source has no more frames to give.
    #[error("frame source exhausted")]
    SourceExhausted,

    /// The inference provider failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the failure.
        reason: String,
    },

    /// The requested capability is not supported by this component.
    #[error("{capability} not supported")]
    Unsupported {
        /// Name of the unsupported capability.
        capability: &'static str,
    },

    /// Input directory does not exist.
    #[error("input directory does not exist: {path}")]
    InputDirNotFound {
        /// Path to the missing directory.
        path: std::path::PathBuf,
    },

    /// Failed to read a scores file.
    #[error("failed to read scores file '{path}'")]
    ScoresRead {
        /// Path to the scores file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a scores file.
    #[error("failed to parse scores file '{path}'")]
    ScoresParse {
        /// Path to the scores file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the forwarded-frame manifest.
    #[error("failed to write manifest '{path}'")]
    ManifestWrite {
        /// Path to the manifest file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
