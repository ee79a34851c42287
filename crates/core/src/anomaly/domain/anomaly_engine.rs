use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::identity::domain::person::PersonKind;
use crate::ledger::domain::table::TableActivity;
use crate::shared::constants::ANOMALY_CONFIDENCE;
use crate::shared::emotion::{Emotion, EmotionLabel};
use crate::shared::table_id::TableId;

use super::alert::{Alert, AlertType};

const GUEST_DISSATISFIED: &[Emotion] = &[Emotion::Angry, Emotion::Sad, Emotion::Neutral];
const STAFF_DISSATISFIED: &[Emotion] = &[Emotion::Angry, Emotion::Sad];

/// Confident angry observations at one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AngerCounters {
    pub guest: u32,
    pub staff: u32,
}

/// Evaluates alert rules after each observation.
///
/// Each (table, alert type) pair fires at most once per session.
pub struct AnomalyEngine {
    confidence_threshold: f64,
    anger: HashMap<TableId, AngerCounters>,
    fired: HashSet<(TableId, AlertType)>,
    alerts: Vec<Alert>,
}

impl AnomalyEngine {
    pub fn new(confidence_threshold: f64) -> Self {
        Self {
            confidence_threshold,
            anger: HashMap::new(),
            fired: HashSet::new(),
            alerts: Vec::new(),
        }
    }

    /// Returns the first alert fired by this observation, if any.
    ///
    /// Every alert that fires is kept in [`AnomalyEngine::alerts`], even when
    /// a second rule fires on the same call.
    pub fn check(
        &mut self,
        table: TableId,
        kind: PersonKind,
        emotion: &EmotionLabel,
        confidence: f64,
        activity: Option<&TableActivity>,
        at: DateTime<Utc>,
    ) -> Option<Alert> {
        let counters = self.anger.entry(table).or_default();
        if emotion.is(Emotion::Angry) && confidence > self.confidence_threshold {
            match kind {
                PersonKind::Guest => counters.guest += 1,
                PersonKind::Staff => counters.staff += 1,
            }
        }
        let counters = *counters;

        let mut first: Option<Alert> = None;

        if counters.guest >= 1 && counters.staff >= 1 && !self.has_fired(table, AlertType::StaffCustomerDispute) {
            first = Some(self.fire(table, AlertType::StaffCustomerDispute, at));
        } else if counters.guest >= 2 && !self.has_fired(table, AlertType::GuestDispute) {
            first = Some(self.fire(table, AlertType::GuestDispute, at));
        }

        let dissatisfied = activity.is_some_and(|a| {
            a.guest_count_matching(GUEST_DISSATISFIED) >= 2 && a.staff_count_matching(STAFF_DISSATISFIED) >= 1
        });
        if dissatisfied && !self.has_fired(table, AlertType::ServiceDissatisfaction) {
            let alert = self.fire(table, AlertType::ServiceDissatisfaction, at);
            first.get_or_insert(alert);
        }

        first
    }

    pub fn has_fired(&self, table: TableId, alert_type: AlertType) -> bool {
        self.fired.contains(&(table, alert_type))
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn alert_mut(&mut self, id: Uuid) -> Option<&mut Alert> {
        self.alerts.iter_mut().find(|a| a.id == id)
    }

    pub fn anger(&self, table: TableId) -> AngerCounters {
        self.anger.get(&table).copied().unwrap_or_default()
    }

    fn fire(&mut self, table: TableId, alert_type: AlertType, at: DateTime<Utc>) -> Alert {
        self.fired.insert((table, alert_type));
        let alert = Alert::new(table, alert_type, at);
        log::warn!("ALERT {}: {}", alert.title, alert.description);
        self.alerts.push(alert.clone());
        alert
    }
}

impl Default for AnomalyEngine {
    fn default() -> Self {
        Self::new(ANOMALY_CONFIDENCE)
    }
}
