use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::identity::domain::person::{PersonKind, ResolvedIdentity};
use crate::shared::bounding_box::BoundingBox;
use crate::shared::emotion::EmotionLabel;
use crate::shared::error::CoreError;
use crate::shared::table_id::TableId;

use super::detection_event::DetectionEvent;
use super::realtime_metrics::RealtimeMetrics;
use super::sentiment::TableSentiment;
use super::table::{TableActivity, TableRecord, TableStatus};

/// One emotion shown by a staff member, tagged with where it was shown.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffObservation {
    pub emotion: EmotionLabel,
    pub confidence: f64,
    pub table: TableId,
}

/// Append-only ledger of detection events with per-table and per-staff
/// aggregates kept alongside.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<DetectionEvent>,
    tables: BTreeMap<TableId, TableRecord>,
    activity: BTreeMap<TableId, TableActivity>,
    staff_history: IndexMap<String, Vec<StaffObservation>>,
    total_guests: usize,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `table` if it is not open yet. Reopening is a no-op.
    pub fn open_table(&mut self, table: TableId, at: DateTime<Utc>) {
        if self.tables.contains_key(&table) {
            return;
        }
        self.tables.insert(table, TableRecord::open(table, at));
        self.activity.insert(table, TableActivity::default());
    }

    pub fn record(
        &mut self,
        table: TableId,
        who: &ResolvedIdentity,
        emotion: EmotionLabel,
        confidence: f64,
        bounding_box: BoundingBox,
        at: DateTime<Utc>,
    ) -> &DetectionEvent {
        self.open_table(table, at);
        let event = DetectionEvent::new(table, who, emotion, confidence, bounding_box, at);

        let activity = self.activity.entry(table).or_default();
        if activity.absorb(&event) {
            self.total_guests += 1;
        }
        if who.kind == PersonKind::Staff {
            self.staff_history
                .entry(who.name.clone())
                .or_default()
                .push(StaffObservation {
                    emotion: event.emotion.clone(),
                    confidence: event.confidence,
                    table,
                });
        }

        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    /// Stamps the closing time and freezes the table's membership lists.
    /// Finalizing twice overwrites the closing time.
    pub fn finalize(&mut self, table: TableId, at: DateTime<Utc>) -> Result<(), CoreError> {
        let record = self
            .tables
            .get_mut(&table)
            .ok_or(CoreError::UnknownTable(table))?;
        record.end_time = Some(at);
        if let Some(activity) = self.activity.get(&table) {
            record.guests = activity.guests.iter().cloned().collect();
            record.staff = activity.staff.iter().cloned().collect();
        }
        Ok(())
    }

    pub fn set_duration(&mut self, table: TableId, frames: usize) -> Result<(), CoreError> {
        let record = self
            .tables
            .get_mut(&table)
            .ok_or(CoreError::UnknownTable(table))?;
        record.duration_frames = Some(frames);
        Ok(())
    }

    pub fn events(&self) -> &[DetectionEvent] {
        &self.events
    }

    /// Events recorded at `table`, in ledger order.
    pub fn table_history(&self, table: TableId) -> Vec<&DetectionEvent> {
        self.events.iter().filter(|e| e.table_number == table).collect()
    }

    pub fn activity(&self, table: TableId) -> Option<&TableActivity> {
        self.activity.get(&table)
    }

    pub fn activities(&self) -> &BTreeMap<TableId, TableActivity> {
        &self.activity
    }

    pub fn staff_history(&self) -> &IndexMap<String, Vec<StaffObservation>> {
        &self.staff_history
    }

    /// Distinct guests across the session, counted per table.
    pub fn total_guests(&self) -> usize {
        self.total_guests
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn is_open(&self, table: TableId) -> bool {
        self.tables.get(&table).is_some_and(|t| !t.is_closed())
    }

    /// Current view of every table. Open tables show their live membership.
    pub fn table_snapshots(&self) -> Vec<TableRecord> {
        self.tables
            .values()
            .map(|record| {
                let mut snapshot = record.clone();
                let activity = self.activity.get(&record.table_id);
                if !record.is_closed() {
                    if let Some(activity) = activity {
                        snapshot.guests = activity.guests.iter().cloned().collect();
                        snapshot.staff = activity.staff.iter().cloned().collect();
                    }
                }
                let engaged = !record.is_closed() && activity.is_some_and(TableActivity::has_guests);
                snapshot.status = if engaged {
                    TableStatus::Engaged
                } else {
                    TableStatus::Free
                };
                snapshot
            })
            .collect()
    }

    /// Sentiment for every opened table, including tables with no events.
    pub fn table_sentiments(&self) -> BTreeMap<TableId, TableSentiment> {
        self.activity
            .iter()
            .map(|(table, activity)| (*table, TableSentiment::from_activity(activity)))
            .collect()
    }

    pub fn metrics(&self, open_table: Option<TableId>) -> RealtimeMetrics {
        let guests_inside = open_table
            .filter(|t| self.is_open(*t))
            .and_then(|t| self.activity.get(&t))
            .map_or(0, |a| a.guests.len());
        let durations: BTreeMap<TableId, usize> = self
            .tables
            .iter()
            .filter_map(|(id, t)| t.duration_frames.map(|d| (*id, d)))
            .collect();
        RealtimeMetrics::compute(
            self.activity.values().flat_map(|a| a.guest_emotions.iter()),
            self.total_guests,
            guests_inside,
            &durations,
        )
    }
}
