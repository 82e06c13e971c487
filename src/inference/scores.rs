//! Inference provider backed by precomputed scores.

use crate::camera::Frame;
use crate::error::{Error, Result};
use crate::inference::{Classification, Detection, InferenceProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, trace};

/// Scores computed elsewhere for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameScores {
    /// Whole-frame classifications.
    pub classifications: Vec<Classification>,
    /// Object detections.
    pub detections: Vec<Detection>,
}

/// Looks up results by frame name in a table loaded from JSON.
///
/// The file is an object keyed by frame name:
///
/// ```json
/// {
///   "0001.jpg": {
///     "classifications": [{ "label": "person", "score": 0.91 }],
///     "detections": [{ "label": "dog", "score": 0.4, "bbox": [10, 20, 80, 90] }]
///   }
/// }
/// ```
///
/// Frames missing from the table have no results.
#[derive(Debug, Clone, Default)]
pub struct ScoreFileProvider {
    scores: HashMap<String, FrameScores>,
}

impl ScoreFileProvider {
    /// Build a provider from an in-memory table.
    pub fn new(scores: HashMap<String, FrameScores>) -> Self {
        Self { scores }
    }

    /// Load a provider from a JSON scores file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ScoresRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let scores: HashMap<String, FrameScores> =
            serde_json::from_str(&contents).map_err(|e| Error::ScoresParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        debug!("Loaded scores for {} frame(s) from {}", scores.len(), path.display());
        Ok(Self::new(scores))
    }

    /// Number of frames with scores.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    fn lookup(&self, frame: &Frame) -> Option<&FrameScores> {
        let scores = self.scores.get(frame.name());
        if scores.is_none() {
            trace!("No scores for frame '{}'", frame.name());
        }
        scores
    }
}

#[async_trait]
impl InferenceProvider for ScoreFileProvider {
    async fn classifications(&self, frame: &Frame, n: usize) -> Result<Vec<Classification>> {
        let mut ranked = self
            .lookup(frame)
            .map(|s| s.classifications.clone())
            .unwrap_or_default();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(n);
        Ok(ranked)
    }

    async fn detections(&self, frame: &Frame) -> Result<Vec<Detection>> {
        Ok(self
            .lookup(frame)
            .map(|s| s.detections.clone())
            .unwrap_or_default())
    }
}
