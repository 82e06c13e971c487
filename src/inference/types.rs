//! Inference result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A labelled confidence score, common to classifications and detections.
pub trait Scored {
    /// Label the score belongs to.
    fn label(&self) -> &str;

    /// Confidence score (0.0 - 1.0).
    fn score(&self) -> f64;
}

/// One ranked classification of a whole frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Class label.
    pub label: String,
    /// Confidence score (0.0 - 1.0).
    pub score: f64,
}

impl Classification {
    /// Create a classification.
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

impl Scored for Classification {
    fn label(&self) -> &str {
        &self.label
    }

    fn score(&self) -> f64 {
        self.score
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:.3}", self.label, self.score)
    }
}

/// Axis-aligned bounding box in pixel coordinates, `[x_min, y_min, x_max, y_max]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    /// Left edge.
    pub x_min: i32,
    /// Top edge.
    pub y_min: i32,
    /// Right edge.
    pub x_max: i32,
    /// Bottom edge.
    pub y_max: i32,
}

impl From<[i32; 4]> for BoundingBox {
    fn from([x_min, y_min, x_max, y_max]: [i32; 4]) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x_min, b.y_min, b.x_max, b.y_max]
    }
}

/// One detected object within a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Object label.
    pub label: String,
    /// Confidence score (0.0 - 1.0).
    pub score: f64,
    /// Where the object is.
    #[serde(default, rename = "bbox")]
    pub bounding_box: BoundingBox,
}

impl Detection {
    /// Create a detection.
    pub fn new(label: impl Into<String>, score: f64, bounding_box: BoundingBox) -> Self {
        Self {
            label: label.into(),
            score,
            bounding_box,
        }
    }
}

impl Scored for Detection {
    fn label(&self) -> &str {
        &self.label
    }

    fn score(&self) -> f64 {
        self.score
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bounding_box;
        write!(
            f,
            "{}={:.3}@[{},{},{},{}]",
            self.label, self.score, b.x_min, b.y_min, b.x_max, b.y_max
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_bbox_from_array() {
        let json = r#"{"label":"dog","score":0.75,"bbox":[1,2,30,40]}"#;
        let detection: Detection = serde_json::from_str(json).unwrap();
        assert_eq!(detection.label, "dog");
        assert_eq!(detection.bounding_box.x_max, 30);
        assert_eq!(detection.bounding_box.y_max, 40);
    }

    #[test]
    fn test_detection_bbox_defaults_when_missing() {
        let detection: Detection = serde_json::from_str(r#"{"label":"cat","score":0.5}"#).unwrap();
        assert_eq!(detection.bounding_box, BoundingBox::default());
    }

    #[test]
    fn test_display() {
        assert_eq!(Classification::new("a", 0.9).to_string(), "a=0.900");
        let d = Detection::new("b", 0.25, BoundingBox::from([1, 1, 2, 2]));
        assert_eq!(d.to_string(), "b=0.250@[1,1,2,2]");
    }
}
