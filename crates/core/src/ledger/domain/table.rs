use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::domain::person::PersonKind;
use crate::shared::emotion::{Emotion, EmotionLabel};
use crate::shared::table_id::{table_number, TableId};

use super::detection_event::DetectionEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableStatus {
    Free,
    Engaged,
}

/// Exported view of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    pub id: Uuid,
    pub table_id: TableId,
    pub table_number: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub guests: Vec<String>,
    pub staff: Vec<String>,
    pub status: TableStatus,
    pub duration_frames: Option<usize>,
}

impl TableRecord {
    pub fn open(table: TableId, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_id: table,
            table_number: table_number(table),
            start_time: at,
            end_time: None,
            guests: Vec::new(),
            staff: Vec::new(),
            status: TableStatus::Free,
            duration_frames: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }
}

/// Live membership and emotion history of one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableActivity {
    pub guests: IndexSet<String>,
    pub staff: IndexSet<String>,
    pub guest_emotions: Vec<EmotionLabel>,
    pub staff_emotions: Vec<EmotionLabel>,
}

impl TableActivity {
    /// Folds an event into the table. Returns true when it introduces a new guest.
    pub fn absorb(&mut self, event: &DetectionEvent) -> bool {
        match event.person_type {
            PersonKind::Staff => {
                self.staff.insert(event.person_name.clone());
                self.staff_emotions.push(event.emotion.clone());
                false
            }
            PersonKind::Guest => {
                self.guest_emotions.push(event.emotion.clone());
                self.guests.insert(event.person_id.clone())
            }
        }
    }

    pub fn guest_count_matching(&self, set: &[Emotion]) -> usize {
        self.guest_emotions.iter().filter(|e| e.is_any(set)).count()
    }

    pub fn staff_count_matching(&self, set: &[Emotion]) -> usize {
        self.staff_emotions.iter().filter(|e| e.is_any(set)).count()
    }

    pub fn has_guests(&self) -> bool {
        !self.guests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::domain::person::ResolvedIdentity;
    use crate::shared::bounding_box::BoundingBox;

    fn event(kind: PersonKind, id: &str, name: &str, emotion: Emotion) -> DetectionEvent {
        let who = ResolvedIdentity {
            person_id: id.into(),
            kind,
            name: name.into(),
        };
        DetectionEvent::new(1, &who, emotion.into(), 0.9, BoundingBox::new(0, 0, 50, 50), Utc::now())
    }

    #[test]
    fn test_open_record() {
        let record = TableRecord::open(7, Utc::now());
        assert_eq!(record.table_number, "07");
        assert!(!record.is_closed());
        assert_eq!(record.status, TableStatus::Free);
    }

    #[test]
    fn test_absorb_reports_new_guests_once() {
        let mut activity = TableActivity::default();
        assert!(activity.absorb(&event(PersonKind::Guest, "guest_1_1", "Guest 1", Emotion::Happy)));
        assert!(!activity.absorb(&event(PersonKind::Guest, "guest_1_1", "Guest 1", Emotion::Sad)));
        assert!(!activity.absorb(&event(PersonKind::Staff, "staff_Ana", "Ana", Emotion::Happy)));
        assert_eq!(activity.guests.len(), 1);
        assert_eq!(activity.guest_emotions.len(), 2);
        assert_eq!(activity.staff.iter().collect::<Vec<_>>(), vec!["Ana"]);
    }

    #[test]
    fn test_count_matching() {
        let mut activity = TableActivity::default();
        activity.absorb(&event(PersonKind::Guest, "g1", "Guest 1", Emotion::Angry));
        activity.absorb(&event(PersonKind::Guest, "g1", "Guest 1", Emotion::Neutral));
        activity.absorb(&event(PersonKind::Guest, "g1", "Guest 1", Emotion::Happy));
        activity.absorb(&event(PersonKind::Staff, "staff_Ana", "Ana", Emotion::Sad));
        assert_eq!(
            activity.guest_count_matching(&[Emotion::Angry, Emotion::Sad, Emotion::Neutral]),
            2
        );
        assert_eq!(activity.staff_count_matching(&[Emotion::Angry, Emotion::Sad]), 1);
    }

    #[test]
    fn test_status_serializes_capitalized() {
        assert_eq!(serde_json::to_value(TableStatus::Engaged).unwrap(), "Engaged");
    }
}
