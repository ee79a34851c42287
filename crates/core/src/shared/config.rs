use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants::{
    ANOMALY_CONFIDENCE, MIN_CONFIDENCE, MIN_FACE_SIZE, PERSON_TRACKING_THRESHOLD,
    PROCESS_EVERY_N_FRAMES, SCENE_CHANGE_THRESHOLD, STAFF_MATCH_THRESHOLD,
};
use super::error::CoreError;

/// Histogram comparison used to detect table changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparatorKind {
    #[default]
    Bhattacharyya,
    Correlation,
}

impl fmt::Display for ComparatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparatorKind::Bhattacharyya => write!(f, "bhattacharyya"),
            ComparatorKind::Correlation => write!(f, "correlation"),
        }
    }
}

impl FromStr for ComparatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bhattacharyya" => Ok(ComparatorKind::Bhattacharyya),
            "correlation" => Ok(ComparatorKind::Correlation),
            other => Err(format!(
                "comparator must be 'bhattacharyya' or 'correlation', got '{other}'"
            )),
        }
    }
}

/// Tunable thresholds for one analysis session.
///
/// Every field falls back to its default when absent from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sample_interval: usize,
    pub min_face_size: i32,
    pub min_confidence: f64,
    pub staff_match_threshold: f64,
    pub person_tracking_threshold: f64,
    pub scene_change_threshold: f64,
    pub anomaly_confidence: f64,
    pub comparator: ComparatorKind,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_interval: PROCESS_EVERY_N_FRAMES,
            min_face_size: MIN_FACE_SIZE,
            min_confidence: MIN_CONFIDENCE,
            staff_match_threshold: STAFF_MATCH_THRESHOLD,
            person_tracking_threshold: PERSON_TRACKING_THRESHOLD,
            scene_change_threshold: SCENE_CHANGE_THRESHOLD,
            anomaly_confidence: ANOMALY_CONFIDENCE,
            comparator: ComparatorKind::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
