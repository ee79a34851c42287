use crate::detection::domain::face_detection::FaceDetection;
use crate::session::observation::FaceObservation;
use crate::shared::bounding_box::BoundingBox;

/// Drops detections too small or too uncertain to be worth recording.
///
/// A face is kept when both sides reach `min_face_size` pixels and its
/// confidence is at least `min_confidence`.
pub fn filter_detections(
    detections: Vec<FaceDetection>,
    min_face_size: i32,
    min_confidence: f64,
) -> Vec<FaceDetection> {
    detections
        .into_iter()
        .filter(|d| passes(&d.bbox, d.confidence, min_face_size, min_confidence))
        .collect()
}

/// [`filter_detections`] for faces that arrive already classified, as in a
/// recorded stream.
pub fn filter_observations(
    observations: Vec<FaceObservation>,
    min_face_size: i32,
    min_confidence: f64,
) -> Vec<FaceObservation> {
    observations
        .into_iter()
        .filter(|o| passes(&o.bbox, o.confidence, min_face_size, min_confidence))
        .collect()
}

fn passes(bbox: &BoundingBox, confidence: f64, min_face_size: i32, min_confidence: f64) -> bool {
    bbox.meets_min_size(min_face_size) && confidence >= min_confidence
}
