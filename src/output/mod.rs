//! Replay output: forwarded-frame manifest and progress reporting.

mod manifest;
pub mod progress;

pub use manifest::{ForwardReason, ManifestRecord, ManifestWriter};
