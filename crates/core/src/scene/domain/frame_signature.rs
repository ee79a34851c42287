use serde::{Deserialize, Serialize};

use crate::shared::constants::SIGNATURE_BINS;
use crate::shared::frame::Frame;

/// Normalized grayscale histogram summarizing a frame's overall look.
///
/// Bins sum to 1 unless every bin is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct FrameSignature(Vec<f64>);

impl FrameSignature {
    pub fn new(bins: Vec<f64>) -> Self {
        let sum: f64 = bins.iter().sum();
        if sum > 0.0 {
            Self(bins.into_iter().map(|b| b / sum).collect())
        } else {
            Self(bins)
        }
    }

    /// 256-bin luma histogram of every pixel in `frame`.
    pub fn from_frame(frame: &Frame) -> Self {
        let mut bins = vec![0.0; SIGNATURE_BINS];
        for &value in frame.luma_plane().iter() {
            bins[value as usize] += 1.0;
        }
        Self::new(bins)
    }

    pub fn bins(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for FrameSignature {
    fn from(bins: Vec<f64>) -> Self {
        Self::new(bins)
    }
}

impl From<FrameSignature> for Vec<f64> {
    fn from(signature: FrameSignature) -> Self {
        signature.0
    }
}
