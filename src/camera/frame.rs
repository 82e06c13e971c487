//! Frame type definitions.

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A single captured image.
///
/// The payload is opaque to the filter: it is never decoded, only handed
/// through to whoever consumes forwarded frames. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    name: String,
    mime_type: String,
    data: Arc<[u8]>,
    captured_at: DateTime<Utc>,
}

impl Frame {
    /// Create a frame from its encoded bytes.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
            captured_at,
        }
    }

    /// Source name of the frame (may be empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type of the payload.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Encoded image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// When the frame was captured.
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

/// Frames returned together by one batch pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBatch {
    /// Frames in source order.
    pub frames: Vec<Frame>,
    /// Capture time reported for the batch as a whole.
    pub captured_at: DateTime<Utc>,
}

impl ImageBatch {
    /// Create a batch with an explicit capture time.
    pub fn new(frames: Vec<Frame>, captured_at: DateTime<Utc>) -> Self {
        Self {
            frames,
            captured_at,
        }
    }

    /// Wrap one frame into a batch stamped with its own capture time.
    pub fn single(frame: Frame) -> Self {
        let captured_at = frame.captured_at();
        Self {
            frames: vec![frame],
            captured_at,
        }
    }

    /// Number of frames in the batch.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the batch holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Capabilities advertised by a frame source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    /// Whether the source can produce point clouds.
    pub supports_point_cloud: bool,
    /// MIME types the source may emit.
    pub mime_types: Vec<String>,
}

/// A 3-D point cloud.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    /// Points as `[x, y, z]` in metres.
    pub points: Vec<[f64; 3]>,
}
