//! One-off data maintenance jobs run from the `rsvp-normalize-phones` binary.

use rsvp_core::phone::PhoneNormalizer;
use rsvp_db::error::StoreResult;
use rsvp_db::models::invitation::UpdateInvitation;
use rsvp_db::repositories::InvitationRepo;
use rsvp_db::DbPool;

/// Outcome counts of a phone backfill run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub total: usize,
    pub updated: usize,
    pub failed: usize,
    pub unchanged: usize,
}

/// Rewrite every stored phone number into E.164.
///
/// Rows already in canonical form are left alone. A row that cannot be
/// normalized, or whose canonical form belongs to another invitation, is
/// logged and counted as failed; the run continues with the next row.
pub async fn normalize_all_phones(
    pool: &DbPool,
    normalizer: &PhoneNormalizer,
) -> StoreResult<NormalizeSummary> {
    let invitations = InvitationRepo::list_all(pool).await?;
    let mut summary = NormalizeSummary {
        total: invitations.len(),
        ..Default::default()
    };
    tracing::info!(total = summary.total, "Normalizing invitation phone numbers");

    for invitation in invitations {
        let normalized = match normalizer.normalize(&invitation.phone) {
            Ok(normalized) => normalized,
            Err(e) => {
                tracing::warn!(
                    invitation_id = invitation.id,
                    phone = %invitation.phone,
                    error = %e,
                    "Failed to normalize phone"
                );
                summary.failed += 1;
                continue;
            }
        };

        if normalized == invitation.phone {
            summary.unchanged += 1;
            continue;
        }

        let update = UpdateInvitation {
            guest_name: invitation.guest_name.clone(),
            phone: normalized.clone(),
        };
        match InvitationRepo::update(pool, invitation.id, &update).await {
            Ok(_) => {
                tracing::info!(
                    invitation_id = invitation.id,
                    from = %invitation.phone,
                    to = %normalized,
                    "Phone normalized"
                );
                summary.updated += 1;
            }
            Err(e) => {
                tracing::warn!(
                    invitation_id = invitation.id,
                    error = %e,
                    "Failed to update phone"
                );
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        total = summary.total,
        updated = summary.updated,
        failed = summary.failed,
        unchanged = summary.unchanged,
        "Phone normalization finished"
    );
    Ok(summary)
}
