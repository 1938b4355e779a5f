//! Phone number normalization to E.164.
//!
//! Numbers written with a leading `+` are parsed in the context of their own
//! country code. Anything else is read as a national number of the configured
//! home region and must be valid there; there is no guessing across regions.

use phonenumber::country;
use phonenumber::Mode;

use crate::error::CoreError;

/// Region assumed for numbers entered without a country code.
pub const DEFAULT_REGION: &str = "RO";

/// Canonicalizes raw user input into E.164 (`+40721234567`).
#[derive(Debug, Clone, Copy)]
pub struct PhoneNormalizer {
    region: country::Id,
}

impl PhoneNormalizer {
    /// Build a normalizer for the given ISO 3166-1 alpha-2 home region.
    pub fn new(region: &str) -> Result<Self, CoreError> {
        let region = region
            .trim()
            .to_ascii_uppercase()
            .parse::<country::Id>()
            .map_err(|_| CoreError::Validation(format!("Unknown phone region: {region}")))?;
        Ok(Self { region })
    }

    /// Normalize `raw` to E.164.
    ///
    /// Fails with [`CoreError::InvalidPhoneNumber`] when the input is not a
    /// number at all, or is not a valid number for the region it resolves to.
    /// Normalizing an E.164 string returns it unchanged.
    pub fn normalize(&self, raw: &str) -> Result<String, CoreError> {
        let trimmed = raw.trim();
        let invalid = || CoreError::InvalidPhoneNumber {
            input: trimmed.to_string(),
        };

        // Vanity spellings ("1-800-FLOWERS") are not accepted as input.
        if !trimmed.bytes().any(|b| b.is_ascii_digit())
            || trimmed.chars().any(char::is_alphabetic)
        {
            return Err(invalid());
        }

        let number = phonenumber::parse(Some(self.region), trimmed).map_err(|_| invalid())?;
        if !phonenumber::is_valid(&number) {
            return Err(invalid());
        }

        Ok(number.format().mode(Mode::E164).to_string())
    }
}

impl Default for PhoneNormalizer {
    fn default() -> Self {
        Self {
            region: country::Id::RO,
        }
    }
}
