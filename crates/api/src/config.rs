use chrono::{DateTime, Utc};
use rsvp_core::phone::DEFAULT_REGION;
use rsvp_core::types::Timestamp;
use serde::Serialize;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and JWT secret have defaults suitable
/// for local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration for admin sessions.
    pub jwt: JwtConfig,
    /// Emails allowed into the admin API.
    pub admin_emails: Vec<String>,
    /// Public origin used to build RSVP links (default: `http://localhost:3000`).
    pub base_url: String,
    /// Home region for phone numbers entered without a country code.
    pub phone_region: String,
    /// Event details shown on the RSVP page.
    pub event: EventConfig,
}

/// The event guests are responding to.
#[derive(Debug, Clone, Serialize)]
pub struct EventConfig {
    pub event_date: Timestamp,
    /// Submissions after this instant are rejected.
    pub rsvp_deadline: Timestamp,
    pub church_name: String,
    pub church_address: String,
    pub restaurant_name: String,
    pub restaurant_address: String,
}

impl EventConfig {
    pub fn deadline_passed(&self, now: Timestamp) -> bool {
        now > self.rsvp_deadline
    }
}

const DEFAULT_EVENT_DATE: &str = "2026-04-19T14:00:00+03:00";
const DEFAULT_RSVP_DEADLINE: &str = "2026-04-12T23:59:59+03:00";

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                      |
    /// |------------------------|------------------------------|
    /// | `HOST`                 | `0.0.0.0`                    |
    /// | `PORT`                 | `3000`                       |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                         |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                         |
    /// | `ADMIN_EMAILS`         | (empty)                      |
    /// | `BASE_URL`             | `http://localhost:3000`      |
    /// | `PHONE_DEFAULT_REGION` | `RO`                         |
    /// | `EVENT_DATE`           | `2026-04-19T14:00:00+03:00`  |
    /// | `RSVP_DEADLINE`        | `2026-04-12T23:59:59+03:00`  |
    /// | `CHURCH_NAME`, `CHURCH_ADDRESS`, `RESTAURANT_NAME`, `RESTAURANT_ADDRESS` | (empty) |
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_list(&env_or("CORS_ORIGINS", "http://localhost:5173"));

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = env_or("SHUTDOWN_TIMEOUT_SECS", "30")
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let event = EventConfig {
            event_date: parse_timestamp("EVENT_DATE", &env_or("EVENT_DATE", DEFAULT_EVENT_DATE)),
            rsvp_deadline: parse_timestamp(
                "RSVP_DEADLINE",
                &env_or("RSVP_DEADLINE", DEFAULT_RSVP_DEADLINE),
            ),
            church_name: env_or("CHURCH_NAME", ""),
            church_address: env_or("CHURCH_ADDRESS", ""),
            restaurant_name: env_or("RESTAURANT_NAME", ""),
            restaurant_address: env_or("RESTAURANT_ADDRESS", ""),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            admin_emails: parse_list(&env_or("ADMIN_EMAILS", "")),
            base_url: env_or("BASE_URL", "http://localhost:3000"),
            phone_region: env_or("PHONE_DEFAULT_REGION", DEFAULT_REGION),
            event,
        }
    }

    /// Case-insensitive allowlist check for admin emails.
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(email.trim()))
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_timestamp(key: &str, raw: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(raw)
        .unwrap_or_else(|e| panic!("{key} must be an RFC 3339 timestamp ({raw:?}): {e}"))
        .with_timezone(&Utc)
}
