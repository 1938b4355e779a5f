//! Admin session tokens.
//!
//! The sign-in handshake happens upstream; what it yields is an HS256 JWT
//! carrying the admin's email, checked against the allowlist on every request.

pub mod jwt;
