#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid phone number: {input:?}")]
    InvalidPhoneNumber { input: String },

    /// The operating system's secure random source failed.
    #[error("Secure random source unavailable: {0}")]
    RandomSource(String),
}
