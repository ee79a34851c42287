use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::table_id::{table_number, TableId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertType {
    #[serde(rename = "dispute_staff_customer")]
    StaffCustomerDispute,
    #[serde(rename = "dispute_customers")]
    GuestDispute,
    #[serde(rename = "service_dissatisfaction")]
    ServiceDissatisfaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Urgent,
    Warning,
}

impl AlertType {
    pub fn severity(self) -> Severity {
        match self {
            AlertType::StaffCustomerDispute | AlertType::GuestDispute => Severity::Urgent,
            AlertType::ServiceDissatisfaction => Severity::Warning,
        }
    }

    pub fn title(self, table: TableId) -> String {
        let what = match self {
            AlertType::StaffCustomerDispute => "Staff-Customer Dispute",
            AlertType::GuestDispute => "Guest Dispute",
            AlertType::ServiceDissatisfaction => "Service Issue",
        };
        format!("Table {}: {what}", table_number(table))
    }

    pub fn description(self) -> &'static str {
        match self {
            AlertType::StaffCustomerDispute => {
                "Both staff and customer showing anger. Immediate intervention needed."
            }
            AlertType::GuestDispute => {
                "Multiple angry guests detected. Possible dispute among guests."
            }
            AlertType::ServiceDissatisfaction => {
                "Negative emotions from both guest and staff. Check service quality."
            }
        }
    }
}

/// Narrative analysis attached to an alert by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertInsight {
    pub root_cause: String,
    pub recommendation: String,
    pub urgency: u8,
}

impl AlertInsight {
    /// Urgency is clamped to `1..=10`.
    pub fn new(root_cause: impl Into<String>, recommendation: impl Into<String>, urgency: i64) -> Self {
        Self {
            root_cause: root_cause.into(),
            recommendation: recommendation.into(),
            urgency: urgency.clamp(1, 10) as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub table_number: TableId,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub is_resolved: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_score: Option<u8>,
}

impl Alert {
    pub fn new(table: TableId, alert_type: AlertType, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_number: table,
            alert_type,
            severity: alert_type.severity(),
            title: alert_type.title(table),
            description: alert_type.description().to_string(),
            is_resolved: false,
            created_at,
            root_cause: None,
            ai_recommendation: None,
            urgency_score: None,
        }
    }

    pub fn attach_insight(&mut self, insight: AlertInsight) {
        self.root_cause = Some(insight.root_cause);
        self.ai_recommendation = Some(insight.recommendation);
        self.urgency_score = Some(insight.urgency);
    }
}
