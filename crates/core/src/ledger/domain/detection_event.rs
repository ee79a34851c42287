use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::domain::person::{PersonKind, ResolvedIdentity};
use crate::shared::bounding_box::BoundingBox;
use crate::shared::emotion::EmotionLabel;
use crate::shared::math::round_to;
use crate::shared::table_id::TableId;

/// One accepted face observation. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    pub id: Uuid,
    pub table_number: TableId,
    pub person_id: String,
    pub person_type: PersonKind,
    pub person_name: String,
    pub emotion: EmotionLabel,
    pub confidence: f64,
    pub bounding_box: BoundingBox,
    pub captured_at: DateTime<Utc>,
}

impl DetectionEvent {
    pub fn new(
        table: TableId,
        who: &ResolvedIdentity,
        emotion: EmotionLabel,
        confidence: f64,
        bounding_box: BoundingBox,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_number: table,
            person_id: who.person_id.clone(),
            person_type: who.kind,
            person_name: who.name.clone(),
            emotion,
            confidence: round_to(confidence, 3),
            bounding_box,
            captured_at,
        }
    }

    pub fn is_staff(&self) -> bool {
        self.person_type == PersonKind::Staff
    }
}
