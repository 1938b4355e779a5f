//! Error taxonomy for the invitation and response stores.

use std::fmt::Display;

use rsvp_core::error::CoreError;
use rsvp_core::types::DbId;

/// Unique constraint on `invitations.phone`.
pub const UQ_INVITATION_PHONE: &str = "uq_invitations_phone";

/// Unique constraint on `invitations.token`.
pub const UQ_INVITATION_TOKEN: &str = "uq_invitations_token";

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Phone number is already used by another invitation")]
    DuplicatePhone,

    #[error("Invitation token is already in use")]
    DuplicateToken,

    #[error("Could not generate a unique invitation token after {attempts} attempts")]
    TokenGenerationExhausted { attempts: u32 },

    #[error("Invitation {0} does not exist")]
    InvitationNotFound(DbId),

    /// Beginning or committing a transaction failed; nothing was written.
    #[error("Transaction failed: {0}")]
    TransactionFailed(#[source] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

/// Classifies unique violations on the invitation constraints; everything
/// else is passed through as [`StoreError::Database`].
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                match db_err.constraint() {
                    Some(UQ_INVITATION_PHONE) => return StoreError::DuplicatePhone,
                    Some(UQ_INVITATION_TOKEN) => return StoreError::DuplicateToken,
                    _ => {}
                }
            }
        }
        StoreError::Database(err)
    }
}
