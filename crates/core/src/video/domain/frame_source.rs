use crate::shared::frame::Frame;

/// Supplies decoded frames in stream order.
///
/// Decoding and container handling live behind this trait; the pipeline
/// only sees [`Frame`]s.
pub trait FrameSource: Send {
    /// Total frame count if known up front, 0 otherwise.
    fn total_frames(&self) -> usize;

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;
}
