use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::anomaly::domain::alert::Alert;
use crate::ledger::domain::detection_event::DetectionEvent;
use crate::ledger::domain::realtime_metrics::RealtimeMetrics;
use crate::ledger::domain::sentiment::TableSentiment;
use crate::ledger::domain::table::{TableActivity, TableRecord};
use crate::performance::domain::staff_performance::StaffPerformanceRecord;
use crate::shared::error::CoreError;
use crate::shared::table_id::TableId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_snapshots: usize,
    pub total_tables: usize,
    pub total_guests: usize,
    pub total_alerts: usize,
    pub staff_detected: Vec<String>,
}

/// Everything a session produced, in the shape uploaded to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub emotion_snapshots: Vec<DetectionEvent>,
    pub tables: Vec<TableRecord>,
    pub table_sentiments: BTreeMap<TableId, TableSentiment>,
    pub alerts: Vec<Alert>,
    pub staff_performance: Vec<StaffPerformanceRecord>,
    pub realtime_metrics: RealtimeMetrics,
    pub summary: SessionSummary,
}

impl SessionReport {
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuilds per-table sentiment from the exported snapshots alone.
    pub fn recompute_sentiments(&self) -> BTreeMap<TableId, TableSentiment> {
        let mut activity: BTreeMap<TableId, TableActivity> = self
            .tables
            .iter()
            .map(|t| (t.table_id, TableActivity::default()))
            .collect();
        for event in &self.emotion_snapshots {
            activity.entry(event.table_number).or_default().absorb(event);
        }
        activity
            .iter()
            .map(|(table, a)| (*table, TableSentiment::from_activity(a)))
            .collect()
    }
}
