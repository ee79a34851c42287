use crate::scene::domain::frame_signature::FrameSignature;
use crate::scene::domain::signature_comparator::SignatureComparator;

/// Bhattacharyya distance between histograms, as computed by OpenCV's
/// `HISTCMP_BHATTACHARYYA`.
///
/// `d = sqrt(1 - Σ sqrt(a·b) / sqrt(Σa · Σb))`, clamped to `[0, 1]`.
/// Signatures with different bin counts are maximally dissimilar.
pub struct BhattacharyyaComparator;

impl SignatureComparator for BhattacharyyaComparator {
    fn dissimilarity(&self, a: &FrameSignature, b: &FrameSignature) -> f64 {
        bhattacharyya_distance(a.bins(), b.bins())
    }
}

fn bhattacharyya_distance(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 1.0;
    }

    let sum_a: f64 = a.iter().sum();
    let sum_b: f64 = b.iter().sum();
    if sum_a <= 0.0 && sum_b <= 0.0 {
        return 0.0;
    }
    if sum_a <= 0.0 || sum_b <= 0.0 {
        return 1.0;
    }

    let overlap: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x.max(0.0) * y.max(0.0)).sqrt())
        .sum();
    let coefficient = overlap / (sum_a * sum_b).sqrt();
    (1.0 - coefficient).max(0.0).sqrt().clamp(0.0, 1.0)
}
