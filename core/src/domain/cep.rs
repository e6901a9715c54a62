//! Postal code (CEP) validation

use std::fmt;

use thiserror::Error;

/// Number of digits in a CEP
pub const CEP_LENGTH: usize = 8;

/// Returned when a string is not exactly eight ASCII digits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid zipcode.")]
pub struct InvalidPostalCode;

/// Returns true iff `code` is exactly eight ASCII decimal digits.
///
/// No trimming, no sign, no separators: `"01001-000"` and `" 01001000"` are
/// both rejected.
pub fn validate(code: &str) -> bool {
    code.len() == CEP_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// A validated CEP. Only values of this type reach the resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn parse(code: &str) -> Result<Self, InvalidPostalCode> {
        if validate(code) {
            Ok(Self(code.to_string()))
        } else {
            Err(InvalidPostalCode)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
