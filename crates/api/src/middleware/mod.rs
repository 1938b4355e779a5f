//! Request extractors guarding the admin API.
//!
//! - [`auth::AdminUser`] -- Bearer token whose email is on the admin allowlist.

pub mod auth;
