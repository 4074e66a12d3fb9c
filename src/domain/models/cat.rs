//! Cat (agent) domain model.

use serde::{Deserialize, Serialize};

const MAX_NAME_LEN: usize = 50;
const MAX_BREED_LEN: usize = 120;

/// A spy cat as stored by the agency.
///
/// `breed` holds the catalog breed id the cat was validated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub years_of_experience: i64,
    pub salary: i64,
}

/// A cat that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCat {
    pub name: String,
    pub breed: String,
    pub years_of_experience: i64,
    pub salary: i64,
}

impl NewCat {
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            breed: breed.into(),
            years_of_experience: 0,
            salary: 0,
        }
    }

    pub fn with_experience(mut self, years: i64) -> Self {
        self.years_of_experience = years;
        self
    }

    pub fn with_salary(mut self, salary: i64) -> Self {
        self.salary = salary;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > MAX_NAME_LEN {
            return Err(format!("cat name must be between 1 and {MAX_NAME_LEN} characters"));
        }
        if self.breed.is_empty() {
            return Err("cat breed cannot be empty".to_string());
        }
        if self.breed.chars().count() > MAX_BREED_LEN {
            return Err(format!("cat breed cannot exceed {MAX_BREED_LEN} characters"));
        }
        if self.years_of_experience < 0 {
            return Err("years of experience cannot be negative".to_string());
        }
        if self.salary < 0 {
            return Err("salary cannot be negative".to_string());
        }
        Ok(())
    }

    /// Attach the id assigned by storage.
    pub fn into_cat(self, id: i64) -> Cat {
        Cat {
            id,
            name: self.name,
            breed: self.breed,
            years_of_experience: self.years_of_experience,
            salary: self.salary,
        }
    }
}

/// The only mutable part of a cat after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatUpdate {
    pub salary: i64,
}

impl CatUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if self.salary < 0 {
            return Err("salary cannot be negative".to_string());
        }
        Ok(())
    }
}
