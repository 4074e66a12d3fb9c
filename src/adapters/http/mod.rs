//! HTTP API for the agency.

pub mod cats;
pub mod errors;
pub mod missions;
pub mod server;
pub mod state;

pub use errors::{ApiError, ErrorResponse};
pub use server::{build_router, HttpServer, ServerError};
pub use state::{AgencyCatService, AgencyMissionService, AppState};
