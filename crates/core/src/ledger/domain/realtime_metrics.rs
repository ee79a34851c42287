use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shared::constants::DEFAULT_VIBE;
use crate::shared::emotion::{Emotion, EmotionLabel};
use crate::shared::table_id::TableId;

/// Session-wide guest mood figures for the live dashboard.
///
/// Percentages are truncated integers over every guest emotion observed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealtimeMetrics {
    pub total_walkins: usize,
    pub guests_inside: usize,
    pub happy_pct: u32,
    pub neutral_pct: u32,
    pub confused_pct: u32,
    pub angry_pct: u32,
    pub service_score: u32,
    pub current_vibe: u32,
    pub avg_table_time_frames: f64,
}

impl RealtimeMetrics {
    pub fn compute<'a>(
        guest_emotions: impl IntoIterator<Item = &'a EmotionLabel>,
        total_walkins: usize,
        guests_inside: usize,
        durations: &BTreeMap<TableId, usize>,
    ) -> Self {
        let avg_table_time_frames = if durations.is_empty() {
            0.0
        } else {
            durations.values().sum::<usize>() as f64 / durations.len() as f64
        };

        let mut total = 0usize;
        let mut counts = [0usize; Emotion::ALL.len()];
        for label in guest_emotions {
            total += 1;
            if let Some(e) = label.emotion() {
                counts[e as usize] += 1;
            }
        }

        if total == 0 {
            return Self {
                guests_inside,
                current_vibe: DEFAULT_VIBE,
                avg_table_time_frames,
                ..Self::default()
            };
        }

        let count = |set: &[Emotion]| set.iter().map(|e| counts[*e as usize]).sum::<usize>();
        let pct = |n: usize| (n * 100 / total) as u32;
        let service_score = pct(count(&[Emotion::Happy, Emotion::Surprise]));

        Self {
            total_walkins,
            guests_inside,
            happy_pct: pct(count(&[Emotion::Happy])),
            neutral_pct: pct(count(&[Emotion::Neutral])),
            confused_pct: pct(count(&[Emotion::Fear, Emotion::Surprise])),
            angry_pct: pct(count(&[Emotion::Angry, Emotion::Sad, Emotion::Disgust])),
            service_score,
            current_vibe: service_score,
            avg_table_time_frames,
        }
    }
}
