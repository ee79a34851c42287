use crate::session::observation::FaceObservation;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::emotion::EmotionLabel;

/// A face located in a frame together with its classified emotion.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDetection {
    pub bbox: BoundingBox,
    pub emotion: EmotionLabel,
    pub confidence: f64,
}

impl FaceDetection {
    pub fn into_observation(self) -> FaceObservation {
        FaceObservation {
            bbox: self.bbox,
            emotion: self.emotion,
            confidence: self.confidence,
            embedding: None,
        }
    }
}
