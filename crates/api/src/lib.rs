//! RSVP API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! maintenance jobs) so integration tests and the binaries can share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod maintenance;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
