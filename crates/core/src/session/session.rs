use uuid::Uuid;

use crate::anomaly::domain::alert::{Alert, AlertInsight};
use crate::anomaly::domain::anomaly_engine::AnomalyEngine;
use crate::identity::domain::identity_resolver::IdentityResolver;
use crate::identity::domain::staff_gallery::StaffGallery;
use crate::ledger::domain::detection_event::DetectionEvent;
use crate::ledger::domain::event_store::EventStore;
use crate::performance::domain::staff_performance::PerformanceRanker;
use crate::scene::domain::frame_signature::FrameSignature;
use crate::scene::domain::scene_segmenter::{SceneChange, SceneSegmenter};
use crate::scene::infrastructure::comparator_factory::create_comparator;
use crate::shared::clock::{Clock, SystemClock};
use crate::shared::config::AnalysisConfig;
use crate::shared::error::CoreError;
use crate::shared::table_id::{TableId, FIRST_TABLE};

use super::observation::FaceObservation;
use super::session_report::{SessionReport, SessionSummary};

/// Stateful analysis of one video stream.
///
/// Feed it with [`Session::begin_frame`] once per sampled frame and
/// [`Session::observe`] once per face in that frame. Call
/// [`Session::finish`] when the stream ends.
pub struct Session {
    gallery: Option<StaffGallery>,
    resolver: IdentityResolver,
    segmenter: SceneSegmenter,
    store: EventStore,
    engine: AnomalyEngine,
    clock: Box<dyn Clock>,
    current_table: TableId,
    finished: bool,
}

impl Session {
    pub fn new(config: &AnalysisConfig, gallery: Option<StaffGallery>) -> Self {
        Self::with_clock(config, gallery, Box::new(SystemClock))
    }

    pub fn with_clock(
        config: &AnalysisConfig,
        gallery: Option<StaffGallery>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut store = EventStore::new();
        store.open_table(FIRST_TABLE, clock.now());
        match &gallery {
            Some(g) => log::info!("Session started with {} staff in gallery", g.len()),
            None => log::info!("Session started without staff gallery"),
        }
        Self {
            gallery,
            resolver: IdentityResolver::new(
                config.staff_match_threshold,
                config.person_tracking_threshold,
            ),
            segmenter: SceneSegmenter::new(
                create_comparator(config.comparator),
                config.scene_change_threshold,
            ),
            store,
            engine: AnomalyEngine::new(config.anomaly_confidence),
            clock,
            current_table: FIRST_TABLE,
            finished: false,
        }
    }

    /// Checks for a table change. On change the previous table is closed,
    /// guests are forgotten and the next table is opened.
    pub fn begin_frame(
        &mut self,
        signature: FrameSignature,
        frame_index: usize,
    ) -> Result<SceneChange, CoreError> {
        self.ensure_running()?;
        let change = self.segmenter.on_frame(signature, frame_index);
        if change.changed {
            let previous = self.current_table;
            let now = self.clock.now();
            self.store.finalize(previous, now)?;
            if let Some(span) = self.segmenter.table_durations().get(&previous) {
                self.store.set_duration(previous, *span)?;
            }
            self.resolver.reset_guests();
            self.store.open_table(change.table_id, now);
            self.current_table = change.table_id;
        }
        Ok(change)
    }

    /// Ingests one classified face. Returns `Ok(None)` when the observation
    /// is discarded for carrying an unusable confidence.
    pub fn observe(
        &mut self,
        observation: FaceObservation,
    ) -> Result<Option<DetectionEvent>, CoreError> {
        self.ensure_running()?;
        if !observation.has_valid_confidence() {
            log::debug!(
                "Discarding observation with confidence {} at table {}",
                observation.confidence,
                self.current_table
            );
            return Ok(None);
        }

        let who = self
            .resolver
            .resolve(observation.embedding.as_ref(), self.gallery.as_ref());
        let now = self.clock.now();
        let table = self.current_table;
        let confidence = observation.confidence;
        let event = self
            .store
            .record(
                table,
                &who,
                observation.emotion,
                observation.confidence,
                observation.bbox,
                now,
            )
            .clone();

        self.engine.check(
            table,
            who.kind,
            &event.emotion,
            confidence,
            self.store.activity(table),
            now,
        );
        Ok(Some(event))
    }

    /// Closes the open table. Any later mutation is rejected.
    pub fn finish(&mut self, frame_index: usize) -> Result<(), CoreError> {
        self.ensure_running()?;
        let table = self.current_table;
        self.segmenter.close(frame_index);
        if let Some(span) = self.segmenter.table_durations().get(&table) {
            self.store.set_duration(table, *span)?;
        }
        self.store.finalize(table, self.clock.now())?;
        self.finished = true;
        log::info!(
            "Session finished: {} tables, {} events, {} alerts",
            self.store.table_count(),
            self.store.events().len(),
            self.engine.alerts().len()
        );
        Ok(())
    }

    /// Attaches externally produced analysis to an alert. Allowed after finish.
    pub fn attach_insight(&mut self, alert_id: Uuid, insight: AlertInsight) -> Result<(), CoreError> {
        let alert = self
            .engine
            .alert_mut(alert_id)
            .ok_or(CoreError::UnknownAlert(alert_id))?;
        alert.attach_insight(insight);
        Ok(())
    }

    pub fn report(&self) -> SessionReport {
        let open_table = (!self.finished).then_some(self.current_table);
        let staff_detected: Vec<String> = self.store.staff_history().keys().cloned().collect();
        SessionReport {
            emotion_snapshots: self.store.events().to_vec(),
            tables: self.store.table_snapshots(),
            table_sentiments: self.store.table_sentiments(),
            alerts: self.engine.alerts().to_vec(),
            staff_performance: PerformanceRanker::rank(
                self.store.staff_history(),
                self.store.activities(),
            ),
            realtime_metrics: self.store.metrics(open_table),
            summary: SessionSummary {
                total_snapshots: self.store.events().len(),
                total_tables: self.store.table_count(),
                total_guests: self.store.total_guests(),
                total_alerts: self.engine.alerts().len(),
                staff_detected,
            },
        }
    }

    pub fn current_table(&self) -> TableId {
        self.current_table
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn alerts(&self) -> &[Alert] {
        self.engine.alerts()
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// `(guests, staff)` tracked at the current table.
    pub fn tracked_counts(&self) -> (usize, usize) {
        self.resolver.counts()
    }

    fn ensure_running(&self) -> Result<(), CoreError> {
        if self.finished {
            Err(CoreError::SessionFinished)
        } else {
            Ok(())
        }
    }
}
