//! Inference provider trait.

use crate::camera::Frame;
use crate::error::Result;
use crate::inference::{Classification, Detection};
use async_trait::async_trait;

/// Turns a frame into classification and detection results.
///
/// Calls may be slow; the filter never holds its state lock across them.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Up to `n` classifications for the frame, highest score first.
    async fn classifications(&self, frame: &Frame, n: usize) -> Result<Vec<Classification>>;

    /// Objects detected in the frame.
    async fn detections(&self, frame: &Frame) -> Result<Vec<Detection>>;
}
