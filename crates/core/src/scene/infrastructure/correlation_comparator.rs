use crate::scene::domain::frame_signature::FrameSignature;
use crate::scene::domain::signature_comparator::SignatureComparator;

/// Maps Pearson correlation onto a dissimilarity: `(1 - r) / 2`.
/// Signatures with different bin counts are maximally dissimilar.
pub struct CorrelationComparator;

impl SignatureComparator for CorrelationComparator {
    fn dissimilarity(&self, a: &FrameSignature, b: &FrameSignature) -> f64 {
        if a.bins().len() != b.bins().len() {
            return 1.0;
        }
        ((1.0 - pearson_correlation(a.bins(), b.bins())) / 2.0).clamp(0.0, 1.0)
    }
}

/// Pearson correlation of two equally long inputs.
///
/// Two flat inputs correlate perfectly; one flat input correlates with nothing.
fn pearson_correlation(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }

    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom < f64::EPSILON {
        return if var_a < f64::EPSILON && var_b < f64::EPSILON {
            1.0
        } else {
            0.0
        };
    }
    cov / denom
}
