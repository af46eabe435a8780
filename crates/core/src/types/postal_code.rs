//! Brazilian postal code (CEP) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PostalCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeError {
    /// The input does not contain exactly eight digits.
    #[error("postal code must contain exactly {digits} digits", digits = PostalCode::DIGITS)]
    InvalidFormat,
}

/// A Brazilian postal code (CEP).
///
/// Parsing strips every non-digit character, so masked input such as
/// `01310-930` is accepted. The normalized form is always exactly eight
/// ASCII digits.
///
/// ## Examples
///
/// ```
/// use vitrine_core::PostalCode;
///
/// let code = PostalCode::parse("01310-930").unwrap();
/// assert_eq!(code.as_str(), "01310930");
/// assert_eq!(code.formatted(), "01310-930");
///
/// assert!(PostalCode::parse("abc").is_err());
/// assert!(PostalCode::parse("0131093").is_err()); // seven digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Number of digits in a CEP.
    pub const DIGITS: usize = 8;

    /// Parse a `PostalCode` from a string, ignoring mask characters.
    ///
    /// # Errors
    ///
    /// Returns [`PostalCodeError::InvalidFormat`] if the input does not
    /// contain exactly eight digits after stripping non-digit characters.
    pub fn parse(s: &str) -> Result<Self, PostalCodeError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();

        if digits.len() != Self::DIGITS {
            return Err(PostalCodeError::InvalidFormat);
        }

        Ok(Self(digits))
    }

    /// Returns the normalized eight-digit code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the code in the conventional `12345-678` display form.
    #[must_use]
    pub fn formatted(&self) -> String {
        let (prefix, suffix) = self.0.split_at(5);
        format!("{prefix}-{suffix}")
    }

    /// Consumes the `PostalCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}
