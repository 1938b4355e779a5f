//! RSVP response entity model and DTOs.

use rsvp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `responses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Response {
    pub id: DbId,
    pub invitation_id: DbId,
    pub attending: bool,
    pub plus_one: bool,
    pub plus_one_name: Option<String>,
    /// Name printed on the seating card.
    pub guest_name_tag: String,
    pub kids_count: i32,
    pub menu_preference: Option<String>,
    pub companion_menu_preference: Option<String>,
    pub comment: Option<String>,
    pub submitted_at: Timestamp,
    pub is_latest: bool,
}

/// DTO for submitting a new response. Responses are never updated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResponse {
    pub invitation_id: DbId,
    pub attending: bool,
    pub plus_one: bool,
    pub plus_one_name: Option<String>,
    pub guest_name_tag: String,
    pub kids_count: i32,
    pub menu_preference: Option<String>,
    pub companion_menu_preference: Option<String>,
    pub comment: Option<String>,
}
