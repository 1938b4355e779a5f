//! Route definitions for the public `/rsvp` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rsvp;
use crate::state::AppState;

/// Routes mounted at `/rsvp`.
///
/// ```text
/// POST   /            -> submit
/// GET    /{token}     -> show
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(rsvp::submit))
        .route("/{token}", get(rsvp::show))
}
