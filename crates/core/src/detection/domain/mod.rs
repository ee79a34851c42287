pub mod emotion_classifier;
pub mod face_detection;
pub mod face_embedder;
