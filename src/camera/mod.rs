//! Frame source seam and frame data types.

mod directory;
mod frame;
mod source;

pub use directory::DirectorySource;
pub use frame::{Frame, ImageBatch, PointCloud, Properties};
pub use source::{FrameSource, FrameStream};
