use std::sync::Arc;

use rsvp_core::phone::PhoneNormalizer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rsvp_db::DbPool,
    /// Server and event configuration, loaded once at startup.
    pub config: Arc<ServerConfig>,
    /// Phone normalizer for the configured home region.
    pub phone: PhoneNormalizer,
}
