//! Web front end for the `weather` app.
//!
//! One HTML page at `/`: a city search form, backed by `weather-core` for the
//! actual lookup. Exposed as a library so the router can be driven in tests.

pub mod error;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
