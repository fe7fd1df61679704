//! LeadForge HTTP server: routes and shared state.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
