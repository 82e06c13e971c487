//! Inference provider seam and result types.

mod provider;
mod scores;
mod types;

pub use provider::InferenceProvider;
pub use scores::{FrameScores, ScoreFileProvider};
pub use types::{BoundingBox, Classification, Detection, Scored};
