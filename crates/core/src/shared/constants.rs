/// Analyze one sampled frame out of every N (1 per second at 30 fps).
pub const PROCESS_EVERY_N_FRAMES: usize = 30;

/// Faces narrower or shorter than this many pixels are dropped before ingestion.
pub const MIN_FACE_SIZE: i32 = 40;
pub const MIN_CONFIDENCE: f64 = 0.40;

/// Embedding distance below which a face is taken to be a gallery staff member.
pub const STAFF_MATCH_THRESHOLD: f64 = 0.50;
/// Embedding distance below which a face is the same guest as before.
pub const PERSON_TRACKING_THRESHOLD: f64 = 0.45;

/// Histogram dissimilarity above which a new table begins.
pub const SCENE_CHANGE_THRESHOLD: f64 = 0.40;
pub const SIGNATURE_BINS: usize = 256;

/// Angry observations count towards disputes only above this confidence.
pub const ANOMALY_CONFIDENCE: f64 = 0.55;

pub const TREND_MIN_SAMPLES: usize = 4;
pub const TREND_DELTA: f64 = 0.12;

pub const RESOLVED_TREND_BONUS: f64 = 5.0;
pub const MAX_STAFF_SCORE: f64 = 100.0;

/// Vibe reported before any guest emotion has been observed.
pub const DEFAULT_VIBE: u32 = 50;
