use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::pipeline::detection_filter::filter_observations;
use crate::pipeline::session_logger::SessionLogger;
use crate::scene::domain::frame_signature::FrameSignature;
use crate::session::observation::FaceObservation;
use crate::session::session::Session;
use crate::shared::config::AnalysisConfig;
use crate::shared::constants::SIGNATURE_BINS;
use crate::shared::error::CoreError;

/// One sampled frame as captured by an upstream classifier: its
/// histogram signature and the faces seen in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub frame_index: usize,
    pub signature: FrameSignature,
    #[serde(default)]
    pub faces: Vec<FaceObservation>,
}

/// A line read with its faces still raw, so one bad face cannot sink the frame.
#[derive(Deserialize)]
struct FrameEnvelope {
    frame_index: usize,
    signature: FrameSignature,
    #[serde(default)]
    faces: Vec<serde_json::Value>,
}

/// What a replay got through and what it had to skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub skipped_lines: usize,
    pub skipped_faces: usize,
}

/// Feeds a JSON Lines recording into a [`Session`], one [`RecordedFrame`]
/// per line, then finishes it at the last frame index seen.
///
/// Unreadable lines and faces are logged and skipped. Faces below the
/// configured size or confidence are dropped before ingestion.
pub struct ReplaySessionUseCase {
    logger: Box<dyn SessionLogger>,
    min_face_size: i32,
    min_confidence: f64,
}

impl ReplaySessionUseCase {
    pub fn new(logger: Box<dyn SessionLogger>, config: &AnalysisConfig) -> Self {
        Self {
            logger,
            min_face_size: config.min_face_size,
            min_confidence: config.min_confidence,
        }
    }

    pub fn execute<R: BufRead>(&mut self, reader: R, session: &mut Session) -> Result<ReplaySummary, CoreError> {
        let mut summary = ReplaySummary::default();
        let mut last_index = 0;

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("Stopped reading at line {line_no}: {e}");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let envelope = match parse_envelope(&line, line_no) {
                Ok(envelope) => envelope,
                Err(e) => {
                    log::warn!("Skipping {e}");
                    summary.skipped_lines += 1;
                    continue;
                }
            };

            summary.frames += 1;
            last_index = envelope.frame_index;
            self.logger.progress(envelope.frame_index, 0);

            let change = session.begin_frame(envelope.signature, envelope.frame_index)?;
            if change.changed {
                self.logger.info(&format!(
                    "Table change at frame {}: table {:02}",
                    envelope.frame_index, change.table_id
                ));
            }

            let mut faces = Vec::with_capacity(envelope.faces.len());
            for (j, raw) in envelope.faces.into_iter().enumerate() {
                match serde_json::from_value::<FaceObservation>(raw) {
                    Ok(face) => faces.push(face),
                    Err(e) => {
                        log::warn!("Skipping face {j} on line {line_no}: {e}");
                        summary.skipped_faces += 1;
                    }
                }
            }
            let faces = filter_observations(faces, self.min_face_size, self.min_confidence);
            self.logger.metric("faces", faces.len() as f64);

            for face in faces {
                let alerts_before = session.alerts().len();
                session.observe(face)?;
                for alert in &session.alerts()[alerts_before..] {
                    self.logger.info(&format!("ALERT {}", alert.title));
                }
            }
        }

        session.finish(last_index)?;
        log::info!(
            "Replayed {} frames ({} lines and {} faces skipped)",
            summary.frames,
            summary.skipped_lines,
            summary.skipped_faces
        );
        self.logger.summary();
        Ok(summary)
    }
}

fn parse_envelope(line: &str, line_no: usize) -> Result<FrameEnvelope, CoreError> {
    let malformed = |source| CoreError::MalformedRecord { line: line_no, source };
    let envelope: FrameEnvelope = serde_json::from_str(line).map_err(malformed)?;
    let bins = envelope.signature.bins().len();
    if bins != SIGNATURE_BINS {
        return Err(malformed(serde::de::Error::custom(format!(
            "signature has {bins} bins, expected {SIGNATURE_BINS}"
        ))));
    }
    Ok(envelope)
}
