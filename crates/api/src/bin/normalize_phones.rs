//! Backfill: rewrite every stored invitation phone number into E.164.
//!
//! Reads `DATABASE_URL` and `PHONE_DEFAULT_REGION` (default `RO`). Exits
//! non-zero when any row could not be normalized.

use rsvp_api::maintenance::normalize_all_phones;
use rsvp_core::phone::{PhoneNormalizer, DEFAULT_REGION};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rsvp_api=info,rsvp_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let region =
        std::env::var("PHONE_DEFAULT_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
    let normalizer = PhoneNormalizer::new(&region)
        .expect("PHONE_DEFAULT_REGION must be an ISO 3166-1 alpha-2 region");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = rsvp_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    let summary = normalize_all_phones(&pool, &normalizer)
        .await
        .expect("Failed to load invitations");

    pool.close().await;

    if summary.failed > 0 {
        std::process::exit(1);
    }
}
