use crate::shared::bounding_box::BoundingBox;
use crate::shared::embedding::Embedding;
use crate::shared::frame::Frame;

/// Produces an identity descriptor for the face inside `bbox`.
///
/// A failure only means the face cannot be recognized; callers carry on
/// without an embedding.
pub trait FaceEmbedder: Send {
    fn embed(&mut self, frame: &Frame, bbox: &BoundingBox) -> Result<Embedding, Box<dyn std::error::Error>>;
}
