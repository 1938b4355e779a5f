pub mod admin;
pub mod health;
pub mod rsvp;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /rsvp                                  submit (public)
/// /rsvp/{token}                          RSVP page data (public)
///
/// /admin/invitations                     list, create (admin only)
/// /admin/invitations/export.csv          CSV export
/// /admin/invitations/{id}                get, update, delete
/// /admin/invitations/{id}/mark-sent      set sent marker (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/rsvp", rsvp::router())
        .nest("/admin/invitations", admin::router())
}
