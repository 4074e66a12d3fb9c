//! Spy Cat Agency - mission tracking backend
//!
//! Agents (cats) are recruited after their breed is checked against a
//! third-party catalog, then assigned to missions of one to three targets.
//!
//! # Architecture
//!
//! The crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and the port traits
//! - **Service Layer** (`services`): cat CRUD and the mission lifecycle engine
//! - **Adapters** (`adapters`): SQLite stores, breed catalog client, HTTP API
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): `serve` and `migrate` commands

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{DomainError, DomainResult, ErrorKind};
pub use domain::models::{
    Cat, Config, Mission, NewCat, NewMission, NewTarget, Page, PageRequest, Target,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CatService, MissionService};
