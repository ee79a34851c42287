use crate::shared::frame::Frame;

use super::face_detection::FaceDetection;

/// Domain interface for face detection with emotion classification.
///
/// Implementations may keep per-stream state, hence `&mut self`.
pub trait EmotionClassifier: Send {
    fn classify(&mut self, frame: &Frame) -> Result<Vec<FaceDetection>, Box<dyn std::error::Error>>;
}
