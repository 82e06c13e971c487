//! Frame source traits.

use crate::camera::{Frame, ImageBatch, PointCloud, Properties};
use crate::error::{Error, Result};
use async_trait::async_trait;

/// Something that produces camera frames.
///
/// Only `images` and `stream` matter to the filter. The remaining
/// capabilities are part of the camera surface so that wrappers can report
/// them as unsupported instead of silently dropping them.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Fetch the current batch of frames.
    async fn images(&self) -> Result<ImageBatch>;

    /// Open a continuous stream of frames.
    async fn stream(&self) -> Result<Box<dyn FrameStream>>;

    /// Report what the source can do.
    async fn properties(&self) -> Result<Properties>;

    /// Fetch the next point cloud.
    async fn next_point_cloud(&self) -> Result<PointCloud> {
        Err(Error::Unsupported {
            capability: "point clouds",
        })
    }
}

/// An open stream of frames.
#[async_trait]
pub trait FrameStream: Send {
    /// Wait for the next frame.
    async fn next(&mut self) -> Result<Frame>;

    /// Close the stream.
    async fn close(&mut self) -> Result<()>;
}
