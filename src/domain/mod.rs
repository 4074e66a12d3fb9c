//! Domain layer for the spy cat agency
//!
//! This module contains the entity models, the error taxonomy and the
//! storage/catalog ports the services are written against.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, ErrorKind};
