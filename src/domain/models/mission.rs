//! Mission domain model.
//!
//! A mission owns 1 to 3 targets and may be assigned to one cat. Its
//! lifecycle only moves forward:
//!
//! ```text
//! Unassigned --assign--> Assigned --complete--> Completed
//!     |
//!     +--delete--> (gone)
//! ```
//!
//! Missions are only deletable while unassigned, and nothing leaves
//! `Completed`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::target::{NewTarget, Target};

/// Maximum number of targets a mission may hold.
pub const MAX_TARGETS: usize = 3;

/// Minimum number of targets a mission must keep once created.
pub const MIN_TARGETS: usize = 1;

/// Lifecycle state derived from a mission's assignment and completion flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionState {
    Unassigned,
    Assigned,
    Completed,
}

impl MissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unassigned => "unassigned",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
        }
    }
}

/// A mission row without its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionRecord {
    pub id: i64,
    pub cat_id: Option<i64>,
    pub completed: bool,
}

impl MissionRecord {
    pub fn is_assigned(&self) -> bool {
        self.cat_id.is_some()
    }

    pub fn state(&self) -> MissionState {
        if self.completed {
            MissionState::Completed
        } else if self.is_assigned() {
            MissionState::Assigned
        } else {
            MissionState::Unassigned
        }
    }

    /// Assemble the aggregate from this row and its targets.
    pub fn with_targets(self, targets: Vec<Target>) -> Mission {
        Mission {
            id: self.id,
            cat_id: self.cat_id,
            completed: self.completed,
            targets,
        }
    }
}

/// A mission aggregate: the mission row plus its targets in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: i64,
    #[serde(with = "cat_id_sentinel", default)]
    pub cat_id: Option<i64>,
    pub targets: Vec<Target>,
    pub completed: bool,
}

impl Mission {
    pub fn record(&self) -> MissionRecord {
        MissionRecord {
            id: self.id,
            cat_id: self.cat_id,
            completed: self.completed,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.cat_id.is_some()
    }

    pub fn state(&self) -> MissionState {
        self.record().state()
    }

    pub fn all_targets_completed(&self) -> bool {
        self.targets.iter().all(|t| t.completed)
    }

    pub fn has_room_for_target(&self) -> bool {
        self.targets.len() < MAX_TARGETS
    }
}

/// A mission proposed for creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMission {
    #[serde(with = "cat_id_sentinel", default)]
    pub cat_id: Option<i64>,
    #[serde(default)]
    pub targets: Vec<NewTarget>,
}

impl NewMission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: NewTarget) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_cat(mut self, cat_id: i64) -> Self {
        self.cat_id = Some(cat_id);
        self
    }
}

/// Wire representation of an optional cat reference: `0` (or `null`) means
/// "no cat", since storage never hands out id 0.
pub mod cat_id_sentinel {
    use super::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.unwrap_or(0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let raw = Option::<i64>::deserialize(deserializer)?;
        Ok(raw.filter(|id| *id != 0))
    }
}
