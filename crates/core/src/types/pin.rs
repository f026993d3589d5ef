//! Six-digit PIN code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PinCode`].
///
/// Length is checked before content, so `"12a"` reports [`PinCodeError::Length`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinCodeError {
    /// The input is not exactly [`PinCode::LENGTH`] characters long.
    #[error("PIN must be exactly {expected} digits (got {actual} characters)")]
    Length {
        /// Required length.
        expected: usize,
        /// Character count of the input.
        actual: usize,
    },
    /// The input contains a character other than `0`-`9`.
    #[error("PIN must contain digits only")]
    NonDigit,
}

/// A PIN code: exactly six ASCII digits.
///
/// Leading zeros are significant, so the code is kept as a string.
///
/// ```
/// use pin_gate_core::{PinCode, PinCodeError};
///
/// assert_eq!(PinCode::parse("000123").unwrap().as_str(), "000123");
/// assert!(matches!(PinCode::parse("12345"), Err(PinCodeError::Length { .. })));
/// assert_eq!(PinCode::parse("12345a"), Err(PinCodeError::NonDigit));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PinCode(String);

impl PinCode {
    /// Number of digits in every PIN.
    pub const LENGTH: usize = 6;

    /// Parse a `PinCode`.
    ///
    /// # Errors
    ///
    /// Returns [`PinCodeError::Length`] when the input is not six characters,
    /// then [`PinCodeError::NonDigit`] when any character is not an ASCII digit.
    pub fn parse(s: &str) -> Result<Self, PinCodeError> {
        let actual = s.chars().count();
        if actual != Self::LENGTH {
            return Err(PinCodeError::Length {
                expected: Self::LENGTH,
                actual,
            });
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PinCodeError::NonDigit);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code with every digit replaced by a bullet.
    #[must_use]
    pub fn masked(&self) -> String {
        "\u{2022}".repeat(Self::LENGTH)
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PinCode {
    type Err = PinCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PinCode {
    type Error = PinCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PinCode> for String {
    fn from(pin: PinCode) -> Self {
        pin.0
    }
}

impl AsRef<str> for PinCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
