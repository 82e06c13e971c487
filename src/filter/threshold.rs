//! Per-label minimum scores.

use crate::constants::WILDCARD_LABEL;
use crate::inference::Scored;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum confidence per label.
///
/// A result counts as a match only when its score is strictly greater than
/// the minimum configured for its label, or strictly greater than the
/// minimum configured for the wildcard label `*`. Labels with neither never
/// match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdMap(BTreeMap<String, f64>);

impl ThresholdMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum score for `label`.
    pub fn insert(&mut self, label: impl Into<String>, min_score: f64) {
        self.0.insert(label.into(), min_score);
    }

    /// Minimum score configured for `label`, if any.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    /// Number of configured labels (wildcard included).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no label is configured. An empty map disables its modality.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(label, minimum)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, min)| (label.as_str(), *min))
    }

    /// Whether any result clears its threshold.
    pub fn keep<T: Scored>(&self, results: &[T]) -> bool {
        results.iter().any(|result| self.keep_one(result))
    }

    /// Whether a single result clears its threshold.
    pub fn keep_one<T: Scored>(&self, result: &T) -> bool {
        let exceeds = |label: &str| {
            self.get(label)
                .is_some_and(|min_score| result.score() > min_score)
        };
        exceeds(result.label()) || exceeds(WILDCARD_LABEL)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ThresholdMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(label, min)| (label.into(), min))
                .collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::inference::{BoundingBox, Classification, Detection};

    fn classes(entries: &[(&str, f64)]) -> Vec<Classification> {
        entries
            .iter()
            .map(|(label, score)| Classification::new(*label, *score))
            .collect()
    }

    #[test]
    fn test_explicit_label_must_strictly_exceed() {
        let map: ThresholdMap = [("a", 0.8)].into_iter().collect();
        assert!(map.keep(&classes(&[("a", 0.9)])));
        assert!(!map.keep(&classes(&[("a", 0.8)])));
        assert!(!map.keep(&classes(&[("a", 0.1)])));
    }

    #[test]
    fn test_unlisted_label_never_triggers_without_wildcard() {
        let map: ThresholdMap = [("a", 0.1)].into_iter().collect();
        assert!(!map.keep(&classes(&[("b", 0.99)])));
    }

    #[test]
    fn test_wildcard_matches_like_explicit_label() {
        let wildcard: ThresholdMap = [("*", 0.8)].into_iter().collect();
        let explicit: ThresholdMap = [("e", 0.8)].into_iter().collect();

        for score in [0.0, 0.1, 0.5, 0.8, 0.81, 0.9, 1.0] {
            let results = classes(&[("e", score)]);
            assert_eq!(
                wildcard.keep(&results),
                explicit.keep(&results),
                "wildcard and explicit disagree at score {score}"
            );
        }
        assert!(wildcard.keep(&classes(&[("e", 0.9)])));
        assert!(!wildcard.keep(&classes(&[("e", 0.1)])));
    }

    #[test]
    fn test_wildcard_rescues_label_with_stricter_explicit_threshold() {
        let map: ThresholdMap = [("a", 0.95), ("*", 0.5)].into_iter().collect();
        assert!(map.keep(&classes(&[("a", 0.6)])));
    }

    #[test]
    fn test_any_entry_is_enough() {
        let map: ThresholdMap = [("a", 0.8)].into_iter().collect();
        assert!(map.keep(&classes(&[("x", 0.99), ("a", 0.1), ("a", 0.85)])));
    }

    #[test]
    fn test_empty_results_never_trigger() {
        let map: ThresholdMap = [("*", 0.0)].into_iter().collect();
        assert!(!map.keep::<Classification>(&[]));
    }

    #[test]
    fn test_detections_keyed_on_detection_label() {
        let map: ThresholdMap = [("b", 0.8)].into_iter().collect();
        let hit = [Detection::new("b", 0.9, BoundingBox::default())];
        let miss = [Detection::new("b", 0.1, BoundingBox::default())];
        assert!(map.keep(&hit));
        assert!(!map.keep(&miss));
    }

    #[test]
    fn test_deserialize_from_toml_table() {
        let map: ThresholdMap = toml::from_str("person = 0.7\n\"*\" = 0.95\n").unwrap();
        assert_eq!(map.get("person"), Some(0.7));
        assert_eq!(map.get(WILDCARD_LABEL), Some(0.95));
        assert_eq!(map.len(), 2);
    }
}
