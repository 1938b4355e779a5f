//! Route definitions for the `/admin/invitations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin/invitations`. Every handler requires an
/// [`AdminUser`](crate::middleware::auth::AdminUser).
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /export.csv        -> export_csv
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// POST   /{id}/mark-sent    -> mark_sent
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::list).post(admin::create))
        .route("/export.csv", get(admin::export_csv))
        .route(
            "/{id}",
            get(admin::get_by_id)
                .put(admin::update)
                .delete(admin::delete),
        )
        .route("/{id}/mark-sent", post(admin::mark_sent))
}
