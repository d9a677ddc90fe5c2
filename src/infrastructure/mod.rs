//! Infrastructure Layer - Swappable implementations
//!
//! Concrete backends for the domain's capability traits: the static API key
//! table and the rate limiting machinery.

pub mod auth;
pub mod rate_limiter;
