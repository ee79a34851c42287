use std::fmt;

use serde::{Deserialize, Serialize};

/// Weight given to labels outside the closed emotion set.
pub const UNKNOWN_WEIGHT: f64 = 0.5;

/// The seven emotion classes produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Neutral,
    Surprise,
    Sad,
    Fear,
    Disgust,
    Angry,
}

impl Emotion {
    pub const ALL: &[Emotion] = &[
        Emotion::Happy,
        Emotion::Neutral,
        Emotion::Surprise,
        Emotion::Sad,
        Emotion::Fear,
        Emotion::Disgust,
        Emotion::Angry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Neutral => "neutral",
            Emotion::Surprise => "surprise",
            Emotion::Sad => "sad",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Angry => "angry",
        }
    }

    /// Sentiment weight in `[0, 1]`: 1.0 is fully positive, 0.0 fully negative.
    pub fn weight(self) -> f64 {
        match self {
            Emotion::Happy => 1.0,
            Emotion::Surprise => 0.65,
            Emotion::Neutral => 0.5,
            Emotion::Sad => 0.2,
            Emotion::Fear => 0.15,
            Emotion::Disgust => 0.1,
            Emotion::Angry => 0.0,
        }
    }

    pub fn from_label(label: &str) -> Option<Emotion> {
        let label = label.trim().to_ascii_lowercase();
        Emotion::ALL.iter().copied().find(|e| e.as_str() == label)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotion label as received from the classifier.
///
/// Known labels are parsed into [`Emotion`] at the boundary. Anything else is
/// kept verbatim so it survives into the export, and weighs [`UNKNOWN_WEIGHT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmotionLabel {
    Known(Emotion),
    Unrecognized(String),
}

impl EmotionLabel {
    pub fn parse(label: &str) -> Self {
        match Emotion::from_label(label) {
            Some(emotion) => EmotionLabel::Known(emotion),
            None => EmotionLabel::Unrecognized(label.to_string()),
        }
    }

    pub fn emotion(&self) -> Option<Emotion> {
        match self {
            EmotionLabel::Known(e) => Some(*e),
            EmotionLabel::Unrecognized(_) => None,
        }
    }

    pub fn weight(&self) -> f64 {
        self.emotion().map_or(UNKNOWN_WEIGHT, Emotion::weight)
    }

    pub fn is(&self, emotion: Emotion) -> bool {
        self.emotion() == Some(emotion)
    }

    pub fn is_any(&self, set: &[Emotion]) -> bool {
        self.emotion().is_some_and(|e| set.contains(&e))
    }

    pub fn as_str(&self) -> &str {
        match self {
            EmotionLabel::Known(e) => e.as_str(),
            EmotionLabel::Unrecognized(s) => s,
        }
    }
}

impl From<Emotion> for EmotionLabel {
    fn from(emotion: Emotion) -> Self {
        EmotionLabel::Known(emotion)
    }
}

impl From<String> for EmotionLabel {
    fn from(label: String) -> Self {
        match Emotion::from_label(&label) {
            Some(emotion) => EmotionLabel::Known(emotion),
            None => EmotionLabel::Unrecognized(label),
        }
    }
}

impl From<EmotionLabel> for String {
    fn from(label: EmotionLabel) -> Self {
        match label {
            EmotionLabel::Known(e) => e.as_str().to_string(),
            EmotionLabel::Unrecognized(s) => s,
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
