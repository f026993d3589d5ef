//! PIN keypad state.
//!
//! One `PinEntry` lives in each browser session. Digits are pressed one at a
//! time; a check is only possible once all six are in.

use serde::{Deserialize, Serialize};

use pin_gate_core::PinCode;

/// Result of the last check, shown until the entry changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    /// An active record matched.
    Success,
    /// No active record matched, or the lookup failed.
    Failure,
}

/// Keypad state for the PIN check page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinEntry {
    digits: String,
    outcome: Option<CheckOutcome>,
    description: Option<String>,
}

impl PinEntry {
    /// Append one digit.
    ///
    /// Ignored when the entry is already full or `digit` is not a single
    /// ASCII digit. Any shown outcome is cleared. Returns whether the digit
    /// was taken.
    pub fn push_digit(&mut self, digit: &str) -> bool {
        let mut chars = digit.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return false;
        };
        if !c.is_ascii_digit() || self.is_full() {
            return false;
        }

        self.digits.push(c);
        self.reset_outcome();
        true
    }

    /// Reset to an empty entry with no outcome.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether six digits are in.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.digits.len() >= PinCode::LENGTH
    }

    /// Whether the check button is enabled.
    #[must_use]
    pub fn can_check(&self) -> bool {
        self.digits.len() == PinCode::LENGTH
    }

    /// The entered code, once complete.
    #[must_use]
    pub fn code(&self) -> Option<PinCode> {
        if self.can_check() {
            PinCode::parse(&self.digits).ok()
        } else {
            None
        }
    }

    /// Number of digits entered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Whether no digit has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Record a successful check.
    pub fn succeed(&mut self, description: Option<String>) {
        self.outcome = Some(CheckOutcome::Success);
        self.description = description;
    }

    /// Record a failed check. No description is kept.
    pub fn fail(&mut self) {
        self.outcome = Some(CheckOutcome::Failure);
        self.description = None;
    }

    /// Outcome of the last check, if the entry has not changed since.
    #[must_use]
    pub const fn outcome(&self) -> Option<CheckOutcome> {
        self.outcome
    }

    /// Description to display; only present after a success.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self.outcome {
            Some(CheckOutcome::Success) => self.description.as_deref(),
            _ => None,
        }
    }

    fn reset_outcome(&mut self) {
        self.outcome = None;
        self.description = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with(digits: &str) -> PinEntry {
        let mut entry = PinEntry::default();
        for d in digits.chars() {
            entry.push_digit(&d.to_string());
        }
        entry
    }

    #[test]
    fn test_push_until_full() {
        let mut entry = entry_with("123456");
        assert!(entry.can_check());
        assert!(!entry.push_digit("7"));
        assert_eq!(entry.len(), 6);
        assert_eq!(entry.code().map(|c| c.to_string()).as_deref(), Some("123456"));
    }

    #[test]
    fn test_rejects_non_digits() {
        let mut entry = PinEntry::default();
        assert!(!entry.push_digit("a"));
        assert!(!entry.push_digit("12"));
        assert!(!entry.push_digit(""));
        assert!(entry.is_empty());
    }

    #[test]
    fn test_check_only_at_six() {
        let entry = entry_with("12345");
        assert!(!entry.can_check());
        assert!(entry.code().is_none());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut entry = entry_with("123456");
        entry.succeed(Some("VIP".to_owned()));
        entry.clear();
        assert_eq!(entry, PinEntry::default());
    }

    #[test]
    fn test_new_digit_hides_previous_outcome() {
        let mut entry = entry_with("12345");
        entry.fail();
        assert_eq!(entry.outcome(), Some(CheckOutcome::Failure));

        entry.push_digit("6");
        assert_eq!(entry.outcome(), None);
    }

    #[test]
    fn test_description_only_on_success() {
        let mut entry = entry_with("123456");
        entry.succeed(Some("VIP".to_owned()));
        assert_eq!(entry.description(), Some("VIP"));

        entry.fail();
        assert_eq!(entry.description(), None);
    }
}
