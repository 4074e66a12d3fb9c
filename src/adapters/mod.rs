//! Adapters for storage, the breed catalog and the HTTP surface.

pub mod catalog;
pub mod http;
pub mod sqlite;
