//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON stdout output
//! - Optional daily-rotated JSON log files
//! - `RUST_LOG` overrides the configured level

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat};
pub use logger::{LoggerImpl, LoggingError};
