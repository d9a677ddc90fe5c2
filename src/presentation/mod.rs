//! Presentation Layer - HTTP API
//!
//! axum router, middleware pipeline, DTOs, and handlers.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use controllers::AppState;
pub use routes::create_router;
