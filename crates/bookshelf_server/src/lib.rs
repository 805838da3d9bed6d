//! HTTP surface for the Bookshelf service.
//! Routing and error mapping live here; domain logic stays in `bookshelf_core`.

pub mod api;
pub mod errors;

pub use api::{build_router, HealthResponse};
pub use errors::{ApiError, ApiResult, ErrorResponse};
