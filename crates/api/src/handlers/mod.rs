//! Request handlers.
//!
//! - [`rsvp`] -- public RSVP page data and submissions, keyed by token.
//! - [`admin`] -- invitation management for signed-in admins.
//!
//! Handlers normalize phone numbers at the boundary, then delegate to the
//! repositories in `rsvp_db` and map errors via [`AppError`].

pub mod admin;
pub mod rsvp;

use crate::error::AppError;

/// Trimmed value of a required text field, or 400 if it is blank.
pub(crate) fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    no_nul(field, trimmed)?;
    Ok(trimmed)
}

/// 400 if an optional text field carries a NUL character.
///
/// Postgres `text` cannot store NUL, so it has to be stopped here.
pub(crate) fn optional(field: &'static str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(value) => no_nul(field, value),
        None => Ok(()),
    }
}

fn no_nul(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.contains('\0') {
        return Err(AppError::BadRequest(format!(
            "{field} must not contain NUL characters"
        )));
    }
    Ok(())
}
