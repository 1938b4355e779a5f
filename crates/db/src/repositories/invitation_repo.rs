//! Repository for the `invitations` table.

use rsvp_core::error::CoreError;
use rsvp_core::token::{generate_token, MAX_TOKEN_ATTEMPTS};
use rsvp_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::error::{StoreError, StoreResult};
use crate::models::invitation::{
    CreateInvitation, Invitation, InvitationWithResponse, UpdateInvitation,
};
use crate::models::response::Response;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, guest_name, phone, token, invite_message, \
    sent_at, opened_at, responded_at, created_at";

/// Provides CRUD and lifecycle tracking for invitations.
pub struct InvitationRepo;

impl InvitationRepo {
    // ── Creation ─────────────────────────────────────────────────────

    /// Insert a new invitation with a freshly generated token.
    ///
    /// The phone must already be normalized. Fails with
    /// [`StoreError::DuplicatePhone`] if another invitation uses it.
    pub async fn create(pool: &PgPool, input: &CreateInvitation) -> StoreResult<Invitation> {
        Self::create_with_tokens(pool, input, generate_token).await
    }

    /// Insert a new invitation, drawing candidate tokens from `next_token`.
    ///
    /// Each candidate is checked against stored tokens before the insert; a
    /// candidate that is taken, or that loses the race between check and
    /// insert, is discarded and the next one tried. After
    /// [`MAX_TOKEN_ATTEMPTS`] candidates the call fails with
    /// [`StoreError::TokenGenerationExhausted`], or
    /// [`StoreError::DuplicateToken`] if the last candidate lost the race.
    pub async fn create_with_tokens<F>(
        pool: &PgPool,
        input: &CreateInvitation,
        mut next_token: F,
    ) -> StoreResult<Invitation>
    where
        F: FnMut() -> Result<String, CoreError>,
    {
        let mut lost_race = false;

        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let token = next_token()?;

            if Self::token_exists(pool, &token).await? {
                tracing::debug!(attempt, "Invitation token collision, retrying");
                lost_race = false;
                continue;
            }

            match Self::insert(pool, input, &token).await {
                Ok(invitation) => {
                    tracing::info!(invitation_id = invitation.id, "Invitation created");
                    return Ok(invitation);
                }
                Err(StoreError::DuplicateToken) => {
                    tracing::warn!(attempt, "Invitation token taken between check and insert");
                    lost_race = true;
                }
                Err(err) => return Err(err),
            }
        }

        if lost_race {
            Err(StoreError::DuplicateToken)
        } else {
            Err(StoreError::TokenGenerationExhausted {
                attempts: MAX_TOKEN_ATTEMPTS,
            })
        }
    }

    /// Whether any invitation already holds `token`.
    pub async fn token_exists(pool: &PgPool, token: &str) -> StoreResult<bool> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM invitations WHERE token = $1)")
                .bind(token)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    async fn insert(
        pool: &PgPool,
        input: &CreateInvitation,
        token: &str,
    ) -> StoreResult<Invitation> {
        let query = format!(
            "INSERT INTO invitations (guest_name, phone, token, invite_message)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let invitation = sqlx::query_as::<_, Invitation>(&query)
            .bind(&input.guest_name)
            .bind(&input.phone)
            .bind(token)
            .bind(&input.invite_message)
            .fetch_one(pool)
            .await?;
        Ok(invitation)
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub async fn get_by_id(pool: &PgPool, id: DbId) -> StoreResult<Invitation> {
        let query = format!("SELECT {COLUMNS} FROM invitations WHERE id = $1");
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::not_found("Invitation", id))
    }

    pub async fn get_by_token(pool: &PgPool, token: &str) -> StoreResult<Invitation> {
        let query = format!("SELECT {COLUMNS} FROM invitations WHERE token = $1");
        sqlx::query_as::<_, Invitation>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::not_found("Invitation", format!("token {token}")))
    }

    pub async fn get_by_phone(pool: &PgPool, phone: &str) -> StoreResult<Invitation> {
        let query = format!("SELECT {COLUMNS} FROM invitations WHERE phone = $1");
        sqlx::query_as::<_, Invitation>(&query)
            .bind(phone)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::not_found("Invitation", format!("phone {phone}")))
    }

    /// All invitations, most recently created first.
    pub async fn list_all(pool: &PgPool) -> StoreResult<Vec<Invitation>> {
        let query = format!("SELECT {COLUMNS} FROM invitations ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, Invitation>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    // ── Lifecycle markers ────────────────────────────────────────────

    /// Record that the invitation was sent. Set-once: later calls keep the
    /// first timestamp.
    pub async fn mark_sent(pool: &PgPool, id: DbId) -> StoreResult<Invitation> {
        let query = format!(
            "UPDATE invitations SET sent_at = COALESCE(sent_at, NOW()) \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::not_found("Invitation", id))
    }

    /// Record that the guest opened the RSVP link. Set-once: the check and
    /// the write happen in the same statement.
    pub async fn mark_opened(pool: &PgPool, id: DbId) -> StoreResult<Invitation> {
        let query = format!(
            "UPDATE invitations SET opened_at = COALESCE(opened_at, NOW()) \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::not_found("Invitation", id))
    }

    // ── Updates ──────────────────────────────────────────────────────

    /// Replace the guest name and phone. The phone must already be
    /// normalized; a phone held by another invitation fails with
    /// [`StoreError::DuplicatePhone`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInvitation,
    ) -> StoreResult<Invitation> {
        let query = format!(
            "UPDATE invitations SET guest_name = $2, phone = $3 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .bind(&input.guest_name)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::not_found("Invitation", id))
    }

    /// Store the finalized invitation message.
    pub async fn set_invite_message(
        pool: &PgPool,
        id: DbId,
        message: &str,
    ) -> StoreResult<Invitation> {
        let query = format!(
            "UPDATE invitations SET invite_message = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .bind(message)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::not_found("Invitation", id))
    }

    // ── Deletion ─────────────────────────────────────────────────────

    /// Delete an invitation together with all of its responses.
    ///
    /// The invitation row is locked first, the same lock response creation
    /// takes, so a response cannot land between the two deletes. Missing
    /// invitations return [`StoreError::NotFound`] without deleting anything.
    pub async fn delete(pool: &PgPool, id: DbId) -> StoreResult<()> {
        let mut tx = pool.begin().await.map_err(StoreError::TransactionFailed)?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM invitations WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(StoreError::not_found("Invitation", id));
        }

        let responses = sqlx::query("DELETE FROM responses WHERE invitation_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM invitations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(StoreError::TransactionFailed)?;

        tracing::info!(
            invitation_id = id,
            responses_deleted = responses.rows_affected(),
            "Invitation deleted"
        );
        Ok(())
    }

    // ── Reporting ────────────────────────────────────────────────────

    /// Every invitation with its latest response (if any), most recently
    /// created first. Feeds the admin dashboard and the CSV export.
    pub async fn list_all_with_latest_response(
        pool: &PgPool,
    ) -> StoreResult<Vec<InvitationWithResponse>> {
        let rows: Vec<InvitationResponseRow> = sqlx::query_as(
            "SELECT
                i.id, i.guest_name, i.phone, i.token, i.invite_message,
                i.sent_at, i.opened_at, i.responded_at, i.created_at,
                r.id AS r_id, r.attending AS r_attending, r.plus_one AS r_plus_one,
                r.plus_one_name AS r_plus_one_name, r.guest_name_tag AS r_guest_name_tag,
                r.kids_count AS r_kids_count, r.menu_preference AS r_menu_preference,
                r.companion_menu_preference AS r_companion_menu_preference,
                r.comment AS r_comment, r.submitted_at AS r_submitted_at
             FROM invitations i
             LEFT JOIN responses r ON r.invitation_id = i.id AND r.is_latest
             ORDER BY i.created_at DESC, i.id DESC",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(InvitationResponseRow::into_view).collect())
    }
}

/// Flat row produced by the invitation/latest-response LEFT JOIN.
///
/// Response columns are all nullable here because invitations without a
/// response still produce a row.
#[derive(Debug, FromRow)]
struct InvitationResponseRow {
    #[sqlx(flatten)]
    invitation: Invitation,
    r_id: Option<DbId>,
    r_attending: Option<bool>,
    r_plus_one: Option<bool>,
    r_plus_one_name: Option<String>,
    r_guest_name_tag: Option<String>,
    r_kids_count: Option<i32>,
    r_menu_preference: Option<String>,
    r_companion_menu_preference: Option<String>,
    r_comment: Option<String>,
    r_submitted_at: Option<Timestamp>,
}

impl InvitationResponseRow {
    fn into_view(self) -> InvitationWithResponse {
        let response = match (self.r_id, self.r_submitted_at) {
            (Some(id), Some(submitted_at)) => Some(Response {
                id,
                invitation_id: self.invitation.id,
                attending: self.r_attending.unwrap_or_default(),
                plus_one: self.r_plus_one.unwrap_or_default(),
                plus_one_name: self.r_plus_one_name,
                guest_name_tag: self.r_guest_name_tag.unwrap_or_default(),
                kids_count: self.r_kids_count.unwrap_or_default(),
                menu_preference: self.r_menu_preference,
                companion_menu_preference: self.r_companion_menu_preference,
                comment: self.r_comment,
                submitted_at,
                is_latest: true,
            }),
            _ => None,
        };

        InvitationWithResponse {
            invitation: self.invitation,
            response,
        }
    }
}
