//! Handlers for the `/admin/invitations` resource.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rsvp_core::invite_message::{default_invite_template, has_placeholders, render_invite_message};
use rsvp_core::types::DbId;
use rsvp_db::models::invitation::{
    CreateInvitation, Invitation, InvitationWithResponse, UpdateInvitation,
};
use rsvp_db::models::response::Response;
use rsvp_db::repositories::{InvitationRepo, ResponseRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::export::{render_csv, EXPORT_FILENAME};
use crate::handlers::{optional, required};
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /api/v1/admin/invitations`.
#[derive(Debug, Deserialize)]
pub struct NewInvitationRequest {
    pub guest_name: String,
    pub phone: String,
    /// Message template; `{{TOKEN}}` and `{{RSVP_LINK}}` are filled in once
    /// the token is assigned. Blank uses the default greeting.
    #[serde(default)]
    pub invite_message: Option<String>,
}

/// An invitation with its full response history, newest first.
#[derive(Debug, Serialize)]
pub struct InvitationDetail {
    #[serde(flatten)]
    pub invitation: Invitation,
    pub responses: Vec<Response>,
}

/// GET /api/v1/admin/invitations
pub async fn list(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<InvitationWithResponse>>>> {
    let invitations = InvitationRepo::list_all_with_latest_response(&state.pool).await?;
    Ok(Json(DataResponse { data: invitations }))
}

/// POST /api/v1/admin/invitations
pub async fn create(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<NewInvitationRequest>,
) -> AppResult<(StatusCode, Json<Invitation>)> {
    let guest_name = required("guest_name", &input.guest_name)?;
    let phone = state.phone.normalize(required("phone", &input.phone)?)?;
    optional("invite_message", input.invite_message.as_deref())?;

    let template = input
        .invite_message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_invite_template(guest_name));

    let mut invitation = InvitationRepo::create(
        &state.pool,
        &CreateInvitation {
            guest_name: guest_name.to_string(),
            phone,
            invite_message: template,
        },
    )
    .await?;

    // The link can only be filled in after the token exists. The invitation
    // is already stored, so a failure here leaves the template in place.
    if has_placeholders(&invitation.invite_message) {
        let message = render_invite_message(
            &invitation.invite_message,
            &invitation.token,
            &state.config.base_url,
        );
        match InvitationRepo::set_invite_message(&state.pool, invitation.id, &message).await {
            Ok(updated) => invitation = updated,
            Err(e) => tracing::warn!(
                invitation_id = invitation.id,
                error = %e,
                "Failed to finalize invitation message"
            ),
        }
    }

    tracing::info!(invitation_id = invitation.id, admin = %admin.email, "Invitation added");
    Ok((StatusCode::CREATED, Json(invitation)))
}

/// GET /api/v1/admin/invitations/{id}
pub async fn get_by_id(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<InvitationDetail>> {
    let invitation = InvitationRepo::get_by_id(&state.pool, id).await?;
    let responses = ResponseRepo::get_all_by_invitation_id(&state.pool, id).await?;
    Ok(Json(InvitationDetail {
        invitation,
        responses,
    }))
}

/// PUT /api/v1/admin/invitations/{id}
pub async fn update(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvitation>,
) -> AppResult<Json<Invitation>> {
    let update = UpdateInvitation {
        guest_name: required("guest_name", &input.guest_name)?.to_string(),
        phone: state.phone.normalize(required("phone", &input.phone)?)?,
    };
    let invitation = InvitationRepo::update(&state.pool, id, &update).await?;
    Ok(Json(invitation))
}

/// DELETE /api/v1/admin/invitations/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    InvitationRepo::delete(&state.pool, id).await?;
    tracing::info!(invitation_id = id, admin = %admin.email, "Invitation removed");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/invitations/{id}/mark-sent
pub async fn mark_sent(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Invitation>> {
    let invitation = InvitationRepo::mark_sent(&state.pool, id).await?;
    Ok(Json(invitation))
}

/// GET /api/v1/admin/invitations/export.csv
pub async fn export_csv(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = InvitationRepo::list_all_with_latest_response(&state.pool).await?;
    let body = render_csv(&rows);
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={EXPORT_FILENAME}"),
            ),
        ],
        body,
    ))
}
