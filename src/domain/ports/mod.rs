//! Port trait definitions (Hexagonal Architecture)
//!
//! Async interfaces the adapters implement:
//! - CatRepository, MissionRepository, TargetRepository: SQL storage
//! - BreedCatalog: third-party breed reference data

pub mod breed_catalog;
pub mod cat_repository;
pub mod mission_repository;
pub mod target_repository;

pub use breed_catalog::{BreedCatalog, CatalogError};
pub use cat_repository::CatRepository;
pub use mission_repository::MissionRepository;
pub use target_repository::TargetRepository;
