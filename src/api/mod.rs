//! HTTP surface for the analysis pipeline.
//!
//! `POST /api/analyze` takes a multipart PDF upload and returns the
//! per-segment language report; `GET /api/health` reports liveness.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_api_server, ApiServer, ServerError, ServerSession};
pub use types::ApiContext;
