//! Handlers for the public `/rsvp` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use rsvp_core::error::CoreError;
use rsvp_core::token::is_well_formed;
use rsvp_db::error::StoreError;
use rsvp_db::models::invitation::{CreateInvitation, Invitation};
use rsvp_db::models::response::{CreateResponse, Response};
use rsvp_db::repositories::{InvitationRepo, ResponseRepo};
use serde::{Deserialize, Serialize};

use crate::config::EventConfig;
use crate::error::{AppError, AppResult};
use crate::handlers::{optional, required};
use crate::state::AppState;

/// What the RSVP page needs to render for a guest.
#[derive(Debug, Serialize)]
pub struct RsvpPage {
    pub guest_name: String,
    pub response: Option<Response>,
    pub event: EventConfig,
    pub deadline_passed: bool,
}

/// Body of `POST /api/v1/rsvp`.
#[derive(Debug, Deserialize)]
pub struct RsvpSubmission {
    /// Invitation token from the RSVP link. Walk-in guests have none.
    #[serde(default)]
    pub token: Option<String>,
    pub guest_name: String,
    pub phone: String,
    pub attending: bool,
    #[serde(default)]
    pub plus_one: bool,
    pub plus_one_name: Option<String>,
    pub kids_count: Option<i32>,
    pub menu_preference: Option<String>,
    pub companion_menu_preference: Option<String>,
    pub comment: Option<String>,
}

/// GET /api/v1/rsvp/{token}
///
/// Opening the link marks the invitation as opened. That marker is
/// bookkeeping only, so a failure to record it is logged and ignored.
pub async fn show(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<RsvpPage>> {
    if !is_well_formed(&token) {
        return Err(StoreError::not_found("Invitation", token).into());
    }
    let invitation = InvitationRepo::get_by_token(&state.pool, &token).await?;

    if invitation.opened_at.is_none() {
        if let Err(e) = InvitationRepo::mark_opened(&state.pool, invitation.id).await {
            tracing::warn!(
                invitation_id = invitation.id,
                error = %e,
                "Failed to mark invitation as opened"
            );
        }
    }

    let response = ResponseRepo::get_latest_by_invitation_id(&state.pool, invitation.id).await?;
    let event = state.config.event.clone();

    Ok(Json(RsvpPage {
        guest_name: invitation.guest_name,
        response,
        deadline_passed: event.deadline_passed(Utc::now()),
        event,
    }))
}

/// POST /api/v1/rsvp
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<RsvpSubmission>,
) -> AppResult<(StatusCode, Json<Response>)> {
    if state.config.event.deadline_passed(Utc::now()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "RSVP deadline has passed".into(),
        )));
    }

    let guest_name = required("guest_name", &input.guest_name)?;
    let phone = state
        .phone
        .normalize(required("phone", &input.phone)?)?;
    optional("token", input.token.as_deref())?;
    optional("plus_one_name", input.plus_one_name.as_deref())?;
    optional("menu_preference", input.menu_preference.as_deref())?;
    optional(
        "companion_menu_preference",
        input.companion_menu_preference.as_deref(),
    )?;
    optional("comment", input.comment.as_deref())?;

    let token = input.token.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let invitation = match token {
        Some(token) => match InvitationRepo::get_by_token(&state.pool, token).await {
            Ok(invitation) => invitation,
            Err(StoreError::NotFound { .. }) => {
                return Err(AppError::BadRequest("Invalid invitation token".into()));
            }
            Err(e) => return Err(e.into()),
        },
        None => find_or_create_walk_in(&state, guest_name, &phone).await?,
    };

    let plus_one_name = if input.plus_one {
        input.plus_one_name
    } else {
        None
    };

    let response = ResponseRepo::create(
        &state.pool,
        &CreateResponse {
            invitation_id: invitation.id,
            attending: input.attending,
            plus_one: input.plus_one,
            plus_one_name,
            guest_name_tag: guest_name.to_string(),
            kids_count: input.kids_count.unwrap_or(0).max(0),
            menu_preference: input.menu_preference,
            companion_menu_preference: input.companion_menu_preference,
            comment: input.comment,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Resolve a guest without a link by phone, creating an invitation on a miss.
///
/// Two walk-in submissions for the same phone can race to create; the loser
/// sees [`StoreError::DuplicatePhone`] and picks up the winner's row.
async fn find_or_create_walk_in(
    state: &AppState,
    guest_name: &str,
    phone: &str,
) -> AppResult<Invitation> {
    match InvitationRepo::get_by_phone(&state.pool, phone).await {
        Ok(invitation) => return Ok(invitation),
        Err(StoreError::NotFound { .. }) => {}
        Err(e) => return Err(e.into()),
    }

    let created = InvitationRepo::create(
        &state.pool,
        &CreateInvitation {
            guest_name: guest_name.to_string(),
            phone: phone.to_string(),
            invite_message: String::new(),
        },
    )
    .await;

    match created {
        Ok(invitation) => {
            tracing::info!(invitation_id = invitation.id, "Walk-in invitation created");
            Ok(invitation)
        }
        Err(StoreError::DuplicatePhone) => {
            Ok(InvitationRepo::get_by_phone(&state.pool, phone).await?)
        }
        Err(e) => Err(e.into()),
    }
}
