use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::shared::constants::{TREND_DELTA, TREND_MIN_SAMPLES};
use crate::shared::emotion::{Emotion, EmotionLabel};

use super::table::TableActivity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Deteriorating,
    Stable,
}

/// Aggregate mood of an emotion sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Mean emotion weight scaled to 0..=100.
    pub avg_happiness: u32,
    pub dominant: EmotionLabel,
    pub trend: Trend,
    pub counts: IndexMap<EmotionLabel, usize>,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self {
            avg_happiness: 0,
            dominant: EmotionLabel::Known(Emotion::Neutral),
            trend: Trend::Stable,
            counts: IndexMap::new(),
        }
    }
}

pub fn sentiment(emotions: &[EmotionLabel]) -> Sentiment {
    if emotions.is_empty() {
        return Sentiment::default();
    }

    let counts = count_labels(emotions);
    let dominant = most_frequent(&counts).unwrap_or(EmotionLabel::Known(Emotion::Neutral));
    let avg_happiness = (mean_weight(emotions) * 100.0).round() as u32;

    let trend = if emotions.len() >= TREND_MIN_SAMPLES {
        let mid = emotions.len() / 2;
        let delta = mean_weight(&emotions[mid..]) - mean_weight(&emotions[..mid]);
        if delta > TREND_DELTA {
            Trend::Improving
        } else if delta < -TREND_DELTA {
            Trend::Deteriorating
        } else {
            Trend::Stable
        }
    } else {
        Trend::Stable
    };

    Sentiment {
        avg_happiness,
        dominant,
        trend,
        counts,
    }
}

/// Mean sentiment weight, 0.0 for an empty slice.
pub fn mean_weight(emotions: &[EmotionLabel]) -> f64 {
    if emotions.is_empty() {
        return 0.0;
    }
    emotions.iter().map(EmotionLabel::weight).sum::<f64>() / emotions.len() as f64
}

/// Most frequent label. Ties go to the label seen first.
pub fn dominant_emotion<'a>(emotions: impl IntoIterator<Item = &'a EmotionLabel>) -> Option<EmotionLabel> {
    most_frequent(&count_labels(emotions))
}

fn count_labels<'a>(emotions: impl IntoIterator<Item = &'a EmotionLabel>) -> IndexMap<EmotionLabel, usize> {
    let mut counts = IndexMap::new();
    for e in emotions {
        *counts.entry(e.clone()).or_default() += 1;
    }
    counts
}

fn most_frequent(counts: &IndexMap<EmotionLabel, usize>) -> Option<EmotionLabel> {
    let mut best: Option<(&EmotionLabel, usize)> = None;
    for (label, &count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.clone())
}

/// Guest and staff sentiment for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSentiment {
    pub guest_sentiment: Sentiment,
    pub staff_sentiment: Sentiment,
    pub guest_count: usize,
    pub staff_list: Vec<String>,
}

impl TableSentiment {
    pub fn from_activity(activity: &TableActivity) -> Self {
        Self {
            guest_sentiment: sentiment(&activity.guest_emotions),
            staff_sentiment: sentiment(&activity.staff_emotions),
            guest_count: activity.guests.len(),
            staff_list: activity.staff.iter().cloned().collect(),
        }
    }
}
