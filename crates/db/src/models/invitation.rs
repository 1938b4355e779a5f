//! Invitation entity model and DTOs.

use rsvp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::response::Response;

/// A row from the `invitations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invitation {
    pub id: DbId,
    pub guest_name: String,
    /// E.164, unique across invitations.
    pub phone: String,
    /// Public RSVP link key, unique and never reassigned.
    pub token: String,
    pub invite_message: String,
    pub sent_at: Option<Timestamp>,
    pub opened_at: Option<Timestamp>,
    pub responded_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new invitation. The token is assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvitation {
    pub guest_name: String,
    pub phone: String,
    #[serde(default)]
    pub invite_message: String,
}

/// DTO for updating an invitation's guest details.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvitation {
    pub guest_name: String,
    pub phone: String,
}

/// An invitation joined with its latest response, if any.
///
/// Read-only view used by the dashboard and the export; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct InvitationWithResponse {
    #[serde(flatten)]
    pub invitation: Invitation,
    pub response: Option<Response>,
}
