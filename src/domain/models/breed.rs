//! Breed reference data from the external catalog.

use serde::{Deserialize, Serialize};

/// A catalog breed. Only the fields the agency uses are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breed {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Breed {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}
