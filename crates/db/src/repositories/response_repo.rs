//! Repository for the `responses` table.

use rsvp_core::error::CoreError;
use rsvp_core::types::DbId;
use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::response::{CreateResponse, Response};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, invitation_id, attending, plus_one, plus_one_name, \
    guest_name_tag, kids_count, menu_preference, companion_menu_preference, \
    comment, submitted_at, is_latest";

/// Append-only RSVP history. Exactly one response per invitation carries
/// `is_latest = true` once any exist.
pub struct ResponseRepo;

impl ResponseRepo {
    /// Record a new response as the invitation's latest.
    ///
    /// In a single transaction: lock the owning invitation, demote every
    /// earlier response, insert the new one as latest, and stamp the
    /// invitation's `responded_at`. Blank optional strings are stored as NULL.
    pub async fn create(pool: &PgPool, input: &CreateResponse) -> StoreResult<Response> {
        if input.kids_count < 0 {
            return Err(CoreError::Validation("kids_count must not be negative".into()).into());
        }

        let mut tx = pool.begin().await.map_err(StoreError::TransactionFailed)?;

        // Row lock serializes concurrent submissions for the same invitation.
        // `submitted_at` is taken after the lock (clock_timestamp, not the
        // transaction start) so history order matches the latest flag.
        let owner: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM invitations WHERE id = $1 FOR UPDATE")
                .bind(input.invitation_id)
                .fetch_optional(&mut *tx)
                .await?;
        if owner.is_none() {
            return Err(StoreError::InvitationNotFound(input.invitation_id));
        }

        sqlx::query(
            "UPDATE responses SET is_latest = false \
             WHERE invitation_id = $1 AND is_latest",
        )
        .bind(input.invitation_id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO responses
                (invitation_id, attending, plus_one, plus_one_name, guest_name_tag,
                 kids_count, menu_preference, companion_menu_preference, comment,
                 submitted_at, is_latest)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, clock_timestamp(), true)
             RETURNING {COLUMNS}"
        );
        let response = sqlx::query_as::<_, Response>(&query)
            .bind(input.invitation_id)
            .bind(input.attending)
            .bind(input.plus_one)
            .bind(non_blank(&input.plus_one_name))
            .bind(&input.guest_name_tag)
            .bind(input.kids_count)
            .bind(non_blank(&input.menu_preference))
            .bind(non_blank(&input.companion_menu_preference))
            .bind(non_blank(&input.comment))
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE invitations SET responded_at = $2 WHERE id = $1")
            .bind(input.invitation_id)
            .bind(response.submitted_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(StoreError::TransactionFailed)?;

        tracing::info!(
            invitation_id = input.invitation_id,
            response_id = response.id,
            attending = response.attending,
            "RSVP response recorded"
        );
        Ok(response)
    }

    pub async fn get_by_id(pool: &PgPool, id: DbId) -> StoreResult<Response> {
        let query = format!("SELECT {COLUMNS} FROM responses WHERE id = $1");
        sqlx::query_as::<_, Response>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::not_found("Response", id))
    }

    /// The invitation's latest response, or `None` if it has not answered yet.
    pub async fn get_latest_by_invitation_id(
        pool: &PgPool,
        invitation_id: DbId,
    ) -> StoreResult<Option<Response>> {
        let query = format!(
            "SELECT {COLUMNS} FROM responses WHERE invitation_id = $1 AND is_latest"
        );
        let response = sqlx::query_as::<_, Response>(&query)
            .bind(invitation_id)
            .fetch_optional(pool)
            .await?;
        Ok(response)
    }

    /// Full response history for an invitation, newest first.
    pub async fn get_all_by_invitation_id(
        pool: &PgPool,
        invitation_id: DbId,
    ) -> StoreResult<Vec<Response>> {
        let query = format!(
            "SELECT {COLUMNS} FROM responses WHERE invitation_id = $1 \
             ORDER BY submitted_at DESC, id DESC"
        );
        let responses = sqlx::query_as::<_, Response>(&query)
            .bind(invitation_id)
            .fetch_all(pool)
            .await?;
        Ok(responses)
    }
}

/// `None` for missing or whitespace-only values.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
