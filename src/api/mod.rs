//! API Module
//!
//! HTTP handlers and routing for the dashboard API.
//!
//! # Endpoints
//! - `/catalog/*` - memoized reads and invalidating writes over the catalog
//! - `/cache/stats`, `/cache/clear`, `/cache/refresh` - operator debug panel
//! - `/health` - health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
