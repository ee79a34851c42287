use std::time::Instant;

use crate::detection::domain::emotion_classifier::EmotionClassifier;
use crate::detection::domain::face_embedder::FaceEmbedder;
use crate::pipeline::detection_filter::filter_detections;
use crate::pipeline::session_logger::SessionLogger;
use crate::scene::domain::frame_signature::FrameSignature;
use crate::session::session::Session;
use crate::shared::config::AnalysisConfig;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

/// Video analysis pipeline: read → sample → segment → classify → embed → ingest.
///
/// Frames are counted from 1 and every `sample_interval`-th frame is
/// analyzed. The session is finished once the source is exhausted.
pub struct AnalyzeVideoUseCase {
    source: Box<dyn FrameSource>,
    classifier: Box<dyn EmotionClassifier>,
    embedder: Option<Box<dyn FaceEmbedder>>,
    logger: Box<dyn SessionLogger>,
    sample_interval: usize,
    min_face_size: i32,
    min_confidence: f64,
}

impl AnalyzeVideoUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        classifier: Box<dyn EmotionClassifier>,
        embedder: Option<Box<dyn FaceEmbedder>>,
        logger: Box<dyn SessionLogger>,
        config: &AnalysisConfig,
    ) -> Self {
        Self {
            source,
            classifier,
            embedder,
            logger,
            sample_interval: config.sample_interval.max(1),
            min_face_size: config.min_face_size,
            min_confidence: config.min_confidence,
        }
    }

    /// Returns the number of frames read.
    pub fn execute(&mut self, session: &mut Session) -> Result<usize, Box<dyn std::error::Error>> {
        let total = self.source.total_frames();
        let mut frame_count = 0;

        for frame in self.source.frames() {
            let frame = frame?;
            frame_count += 1;
            if frame_count % self.sample_interval != 0 {
                continue;
            }
            self.logger.progress(frame_count, total);
            Self::analyze_frame(
                &frame,
                frame_count,
                session,
                self.classifier.as_mut(),
                self.embedder.as_mut(),
                self.logger.as_mut(),
                (self.min_face_size, self.min_confidence),
            )?;
        }

        session.finish(frame_count)?;
        self.logger.summary();
        Ok(frame_count)
    }

    fn analyze_frame(
        frame: &Frame,
        frame_count: usize,
        session: &mut Session,
        classifier: &mut dyn EmotionClassifier,
        mut embedder: Option<&mut Box<dyn FaceEmbedder>>,
        logger: &mut dyn SessionLogger,
        (min_face_size, min_confidence): (i32, f64),
    ) -> Result<(), Box<dyn std::error::Error>> {
        let t0 = Instant::now();
        let change = session.begin_frame(FrameSignature::from_frame(frame), frame_count)?;
        logger.timing("segment", t0.elapsed().as_secs_f64() * 1000.0);
        if change.changed {
            logger.info(&format!("Table change at frame {frame_count}: table {:02}", change.table_id));
        }

        let t0 = Instant::now();
        let detections = match classifier.classify(frame) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("Classifier failed on frame {frame_count}: {e}");
                return Ok(());
            }
        };
        logger.timing("classify", t0.elapsed().as_secs_f64() * 1000.0);

        let detections = filter_detections(detections, min_face_size, min_confidence);
        logger.metric("faces", detections.len() as f64);

        for detection in detections {
            let embedding = match embedder.as_mut() {
                Some(e) => match e.embed(frame, &detection.bbox) {
                    Ok(embedding) => Some(embedding),
                    Err(err) => {
                        log::debug!("No embedding for face at frame {frame_count}: {err}");
                        None
                    }
                },
                None => None,
            };
            let mut observation = detection.into_observation();
            observation.embedding = embedding;

            let alerts_before = session.alerts().len();
            if let Some(event) = session.observe(observation)? {
                log::debug!(
                    "T{:02} F{frame_count:04} | {:15} | {:10} ({:.0}%)",
                    event.table_number,
                    event.person_name,
                    event.emotion,
                    event.confidence * 100.0
                );
            }
            for alert in &session.alerts()[alerts_before..] {
                logger.info(&format!("ALERT {}", alert.title));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_detection::FaceDetection;
    use crate::pipeline::session_logger::NullSessionLogger;
    use crate::shared::bounding_box::BoundingBox;
    use crate::shared::embedding::Embedding;
    use crate::shared::emotion::Emotion;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubSource {
        frames: Vec<Frame>,
    }

    impl StubSource {
        /// `count` solid frames; frames at or after `switch_at` are bright.
        fn new(count: usize, switch_at: usize) -> Self {
            let frames = (0..count)
                .map(|i| {
                    let value = if i + 1 >= switch_at { 230 } else { 20 };
                    Frame::new(vec![value; 8 * 8 * 3], 8, 8, 3, i).unwrap()
                })
                .collect();
            Self { frames }
        }
    }

    impl FrameSource for StubSource {
        fn total_frames(&self) -> usize {
            self.frames.len()
        }

        fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(self.frames.drain(..).map(Ok))
        }
    }

    struct StubClassifier {
        results: HashMap<usize, Vec<FaceDetection>>,
        failing: Vec<usize>,
        calls: Arc<Mutex<Vec<usize>>>,
    }

    impl StubClassifier {
        fn new(results: HashMap<usize, Vec<FaceDetection>>) -> Self {
            Self {
                results,
                failing: Vec::new(),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl EmotionClassifier for StubClassifier {
        fn classify(&mut self, frame: &Frame) -> Result<Vec<FaceDetection>, Box<dyn std::error::Error>> {
            self.calls.lock().unwrap().push(frame.index());
            if self.failing.contains(&frame.index()) {
                return Err("model crashed".into());
            }
            Ok(self.results.get(&frame.index()).cloned().unwrap_or_default())
        }
    }

    /// Embeds every face at the same point, or fails for all faces.
    struct StubEmbedder {
        fail: bool,
    }

    impl FaceEmbedder for StubEmbedder {
        fn embed(&mut self, _frame: &Frame, _bbox: &BoundingBox) -> Result<Embedding, Box<dyn std::error::Error>> {
            if self.fail {
                Err("no landmarks".into())
            } else {
                Ok(Embedding::new(vec![5.0, 5.0]))
            }
        }
    }

    fn detection(emotion: Emotion, size: i32, confidence: f64) -> FaceDetection {
        FaceDetection {
            bbox: BoundingBox::new(0, 0, size, size),
            emotion: emotion.into(),
            confidence,
        }
    }

    fn config(interval: usize) -> AnalysisConfig {
        AnalysisConfig {
            sample_interval: interval,
            ..AnalysisConfig::default()
        }
    }

    fn run(
        source: StubSource,
        classifier: StubClassifier,
        embedder: Option<StubEmbedder>,
        interval: usize,
    ) -> Session {
        let config = config(interval);
        let mut session = Session::new(&config, None);
        let mut use_case = AnalyzeVideoUseCase::new(
            Box::new(source),
            Box::new(classifier),
            embedder.map(|e| Box::new(e) as Box<dyn FaceEmbedder>),
            Box::new(NullSessionLogger),
            &config,
        );
        use_case.execute(&mut session).unwrap();
        session
    }

    #[test]
    fn test_samples_every_nth_frame() {
        let classifier = StubClassifier::new(HashMap::new());
        let calls = classifier.calls.clone();
        run(StubSource::new(10, usize::MAX), classifier, None, 3);
        // frames counted from 1: 3, 6, 9 -> indices 2, 5, 8
        assert_eq!(*calls.lock().unwrap(), vec![2, 5, 8]);
    }

    #[test]
    fn test_filters_small_and_uncertain_faces() {
        let results = HashMap::from([(
            1,
            vec![
                detection(Emotion::Happy, 60, 0.9),
                detection(Emotion::Sad, 20, 0.9),
                detection(Emotion::Angry, 60, 0.2),
            ],
        )]);
        let session = run(StubSource::new(2, usize::MAX), StubClassifier::new(results), None, 2);
        let report = session.report();
        assert_eq!(report.emotion_snapshots.len(), 1);
        assert!(report.emotion_snapshots[0].emotion.is(Emotion::Happy));
    }

    #[test]
    fn test_embedder_links_recurring_guest() {
        let results = HashMap::from([
            (0, vec![detection(Emotion::Happy, 60, 0.9)]),
            (1, vec![detection(Emotion::Sad, 60, 0.9)]),
        ]);
        let session = run(
            StubSource::new(2, usize::MAX),
            StubClassifier::new(results),
            Some(StubEmbedder { fail: false }),
            1,
        );
        let report = session.report();
        assert_eq!(report.summary.total_guests, 1);
        assert_eq!(report.emotion_snapshots[0].person_id, report.emotion_snapshots[1].person_id);
    }

    #[test]
    fn test_embedder_failure_means_fresh_guest() {
        let results = HashMap::from([
            (0, vec![detection(Emotion::Happy, 60, 0.9)]),
            (1, vec![detection(Emotion::Happy, 60, 0.9)]),
        ]);
        let session = run(
            StubSource::new(2, usize::MAX),
            StubClassifier::new(results),
            Some(StubEmbedder { fail: true }),
            1,
        );
        assert_eq!(session.report().summary.total_guests, 2);
    }

    #[test]
    fn test_classifier_error_skips_only_that_frame() {
        let results = HashMap::from([
            (0, vec![detection(Emotion::Happy, 60, 0.9)]),
            (1, vec![detection(Emotion::Happy, 60, 0.9)]),
            (2, vec![detection(Emotion::Happy, 60, 0.9)]),
        ]);
        let mut classifier = StubClassifier::new(results);
        classifier.failing = vec![1];
        let session = run(StubSource::new(3, usize::MAX), classifier, None, 1);
        assert_eq!(session.report().emotion_snapshots.len(), 2);
    }

    #[test]
    fn test_scene_change_opens_new_table_and_finishes() {
        let results = HashMap::from([
            (0, vec![detection(Emotion::Happy, 60, 0.9)]),
            (3, vec![detection(Emotion::Angry, 60, 0.9)]),
        ]);
        let session = run(StubSource::new(4, 3), StubClassifier::new(results), None, 1);
        assert!(session.is_finished());
        let report = session.report();
        assert_eq!(report.summary.total_tables, 2);
        assert_eq!(report.emotion_snapshots[1].table_number, 2);
        assert_eq!(report.tables[0].duration_frames, Some(3));
        assert_eq!(report.tables[1].duration_frames, Some(1));
        assert!(report.tables.iter().all(|t| t.end_time.is_some()));
    }

    #[test]
    fn test_empty_source_reports_table_one_only() {
        let session = run(StubSource::new(0, usize::MAX), StubClassifier::new(HashMap::new()), None, 30);
        let report = session.report();
        assert_eq!(report.summary.total_tables, 1);
        assert!(report.emotion_snapshots.is_empty());
        assert!(report.tables[0].end_time.is_some());
    }
}
