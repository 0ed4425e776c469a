//! service-core: shared infrastructure for the person microservice.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
