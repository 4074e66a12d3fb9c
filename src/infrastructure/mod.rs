//! Infrastructure layer module
//!
//! Process-wide concerns that sit outside the hexagon:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing-subscriber)

pub mod config;
pub mod logging;
