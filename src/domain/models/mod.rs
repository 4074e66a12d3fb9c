pub mod breed;
pub mod cat;
pub mod config;
pub mod mission;
pub mod pagination;
pub mod target;

pub use breed::Breed;
pub use cat::{Cat, CatUpdate, NewCat};
pub use config::{
    CatalogConfig, Config, DatabaseConfig, LoggingConfig, MissionPolicy, ServerConfig,
};
pub use mission::{Mission, MissionRecord, MissionState, NewMission, MAX_TARGETS, MIN_TARGETS};
pub use pagination::{Page, PageMeta, PageRequest};
pub use target::{NewTarget, Target, TargetUpdate};
