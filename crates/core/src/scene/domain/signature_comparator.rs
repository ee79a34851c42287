use super::frame_signature::FrameSignature;

/// Measures how different two frame signatures are.
///
/// Implementations must return a value in `[0, 1]`, where 0 means the
/// signatures are identical and 1 means they share nothing.
pub trait SignatureComparator: Send {
    fn dissimilarity(&self, a: &FrameSignature, b: &FrameSignature) -> f64;
}
