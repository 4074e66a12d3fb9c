//! HTTP client for the third-party breed catalog.

pub mod client;
pub mod errors;
pub mod retry;

pub use client::{BreedCache, HttpBreedCatalog};
pub use errors::FetchError;
pub use retry::RetryPolicy;
