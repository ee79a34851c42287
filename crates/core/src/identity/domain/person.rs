use serde::{Deserialize, Serialize};

use crate::shared::embedding::Embedding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonKind {
    Staff,
    Guest,
}

impl PersonKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PersonKind::Staff => "staff",
            PersonKind::Guest => "guest",
        }
    }
}

/// A tracked individual. The embedding follows the most recent match.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: String,
    pub kind: PersonKind,
    pub name: String,
    pub embedding: Option<Embedding>,
}

impl Person {
    pub fn identity(&self) -> ResolvedIdentity {
        ResolvedIdentity {
            person_id: self.id.clone(),
            kind: self.kind,
            name: self.name.clone(),
        }
    }
}

/// Outcome of resolving one face against known people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub person_id: String,
    pub kind: PersonKind,
    pub name: String,
}

impl ResolvedIdentity {
    pub fn is_staff(&self) -> bool {
        self.kind == PersonKind::Staff
    }
}
