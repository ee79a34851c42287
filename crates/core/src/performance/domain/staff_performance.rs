use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::ledger::domain::event_store::StaffObservation;
use crate::ledger::domain::sentiment::{dominant_emotion, mean_weight};
use crate::ledger::domain::table::TableActivity;
use crate::shared::constants::{MAX_STAFF_SCORE, RESOLVED_TREND_BONUS};
use crate::shared::emotion::{Emotion, EmotionLabel};
use crate::shared::math::round_to;
use crate::shared::table_id::TableId;

const GUEST_NEGATIVE: &[Emotion] = &[Emotion::Angry, Emotion::Sad, Emotion::Disgust];
const STAFF_POSITIVE: &[Emotion] = &[Emotion::Happy, Emotion::Neutral];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "High Empathy")]
    HighEmpathy,
    #[serde(rename = "Consistent")]
    Consistent,
    #[serde(rename = "Needs Support")]
    NeedsSupport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceCategory {
    TopPerformer,
    MostPraised,
    NeedsSupport,
}

fn classify(score: f64) -> (Badge, PerformanceCategory) {
    if score >= 75.0 {
        (Badge::HighEmpathy, PerformanceCategory::TopPerformer)
    } else if score >= 55.0 {
        (Badge::Consistent, PerformanceCategory::MostPraised)
    } else {
        (Badge::NeedsSupport, PerformanceCategory::NeedsSupport)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffPerformanceRecord {
    pub name: String,
    pub score: f64,
    pub badge: Badge,
    pub category: PerformanceCategory,
    pub dominant_emotion: EmotionLabel,
    pub tables_served: usize,
    pub resolved_negative_trends: usize,
    pub detection_count: usize,
    pub rank: usize,
}

/// Scores and ranks staff from the emotions they showed during the session.
pub struct PerformanceRanker;

impl PerformanceRanker {
    pub fn rank(
        staff_history: &IndexMap<String, Vec<StaffObservation>>,
        tables: &BTreeMap<TableId, TableActivity>,
    ) -> Vec<StaffPerformanceRecord> {
        let mut records: Vec<StaffPerformanceRecord> = staff_history
            .iter()
            .filter(|(_, observations)| !observations.is_empty())
            .map(|(name, observations)| Self::score(name, observations, tables))
            .collect();

        records.sort_by(|a, b| b.score.total_cmp(&a.score));
        for (i, record) in records.iter_mut().enumerate() {
            record.rank = i + 1;
        }
        records
    }

    fn score(
        name: &str,
        observations: &[StaffObservation],
        tables: &BTreeMap<TableId, TableActivity>,
    ) -> StaffPerformanceRecord {
        let emotions: Vec<EmotionLabel> = observations.iter().map(|o| o.emotion.clone()).collect();
        let served: IndexSet<TableId> = observations.iter().map(|o| o.table).collect();

        let resolved = served
            .iter()
            .filter(|table| {
                let guest_negatives = tables
                    .get(*table)
                    .map_or(0, |a| a.guest_count_matching(GUEST_NEGATIVE));
                let staff_positives = observations
                    .iter()
                    .filter(|o| o.table == **table && o.emotion.is_any(STAFF_POSITIVE))
                    .count();
                guest_negatives > 0 && staff_positives > guest_negatives
            })
            .count();

        let score = (100.0 * mean_weight(&emotions) + resolved as f64 * RESOLVED_TREND_BONUS)
            .min(MAX_STAFF_SCORE);
        let (badge, category) = classify(score);

        StaffPerformanceRecord {
            name: name.to_string(),
            score: round_to(score, 1),
            badge,
            category,
            dominant_emotion: dominant_emotion(&emotions)
                .unwrap_or(EmotionLabel::Known(Emotion::Neutral)),
            tables_served: served.len(),
            resolved_negative_trends: resolved,
            detection_count: observations.len(),
            rank: 0,
        }
    }
}
