use serde::{Deserialize, Serialize};

/// Fixed-length face descriptor produced by the external embedder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Euclidean distance. Smaller means more similar.
    ///
    /// Descriptors of different dimensionality are never similar and
    /// yield `f64::INFINITY`.
    pub fn distance(&self, other: &Embedding) -> f64 {
        if self.0.len() != other.0.len() {
            return f64::INFINITY;
        }
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| {
                let d = *a as f64 - *b as f64;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_identical_is_zero() {
        let a = Embedding::new(vec![0.3, -0.2, 0.9]);
        assert_relative_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Embedding::new(vec![0.1, 0.4]);
        let b = Embedding::new(vec![0.5, -0.2]);
        assert_relative_eq!(a.distance(&b), b.distance(&a));
    }

    #[test]
    fn test_distance_known_value() {
        let a = Embedding::new(vec![0.0, 0.0]);
        let b = Embedding::new(vec![3.0, 4.0]);
        assert_relative_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_distance_grows_with_separation() {
        let origin = Embedding::new(vec![0.0, 0.0]);
        let near = Embedding::new(vec![0.1, 0.0]);
        let far = Embedding::new(vec![0.9, 0.0]);
        assert!(origin.distance(&near) < origin.distance(&far));
    }

    #[test]
    fn test_mismatched_dimensions_never_match() {
        let a = Embedding::new(vec![0.0, 0.0]);
        let b = Embedding::new(vec![0.0, 0.0, 0.0]);
        assert!(a.distance(&b).is_infinite());
    }
}
