use serde::{Deserialize, Serialize};

use crate::shared::bounding_box::BoundingBox;
use crate::shared::embedding::Embedding;
use crate::shared::emotion::EmotionLabel;

/// One classified face in a sampled frame, as handed to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bbox: BoundingBox,
    pub emotion: EmotionLabel,
    pub confidence: f64,
    #[serde(default)]
    pub embedding: Option<Embedding>,
}

impl FaceObservation {
    pub fn new(bbox: BoundingBox, emotion: impl Into<EmotionLabel>, confidence: f64) -> Self {
        Self {
            bbox,
            emotion: emotion.into(),
            confidence,
            embedding: None,
        }
    }

    pub fn with_embedding(mut self, embedding: Embedding) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Confidence is a probability. NaN and out-of-range values are not.
    pub fn has_valid_confidence(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::emotion::Emotion;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0.0, true)]
    #[case::one(1.0, true)]
    #[case::typical(0.73, true)]
    #[case::negative(-0.1, false)]
    #[case::above_one(1.2, false)]
    #[case::nan(f64::NAN, false)]
    fn test_confidence_validity(#[case] confidence: f64, #[case] valid: bool) {
        let obs = FaceObservation::new(BoundingBox::new(0, 0, 50, 50), Emotion::Happy, confidence);
        assert_eq!(obs.has_valid_confidence(), valid);
    }

    #[test]
    fn test_embedding_defaults_to_none() {
        let obs: FaceObservation = serde_json::from_str(
            r#"{"bbox": {"x": 1, "y": 2, "w": 50, "h": 60}, "emotion": "sad", "confidence": 0.8}"#,
        )
        .unwrap();
        assert!(obs.embedding.is_none());
        assert!(obs.emotion.is(Emotion::Sad));
    }
}
