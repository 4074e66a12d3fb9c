//! Target domain model.

use serde::{Deserialize, Serialize};

/// A sub-task of a mission.
///
/// A target belongs to exactly one mission for its whole lifetime; only
/// `notes` (while incomplete) and `completed` (false to true) ever change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: i64,
    pub mission_id: i64,
    pub name: String,
    pub country: String,
    pub notes: String,
    pub completed: bool,
}

/// A target proposed for creation, either with a new mission or added later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTarget {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub notes: String,
}

impl NewTarget {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("target name cannot be empty".to_string());
        }
        if self.country.trim().is_empty() {
            return Err("target country cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn into_target(self, id: i64, mission_id: i64) -> Target {
        Target {
            id,
            mission_id,
            name: self.name,
            country: self.country,
            notes: self.notes,
            completed: false,
        }
    }
}

/// Notes replacement for an incomplete target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetUpdate {
    pub notes: String,
}
