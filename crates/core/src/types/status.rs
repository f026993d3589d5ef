//! PIN record status.

use serde::{Deserialize, Serialize};

/// Whether a PIN record is usable.
///
/// Records are never physically removed; deactivating one flips it to
/// [`PinStatus::Inactive`]. The table store keeps this as an `is_active`
/// boolean column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PinStatus {
    /// The code passes verification and shows on the admin list.
    #[default]
    Active,
    /// Soft-deleted.
    Inactive,
}

impl PinStatus {
    /// Map from the stored `is_active` flag.
    #[must_use]
    pub const fn from_is_active(is_active: bool) -> Self {
        if is_active { Self::Active } else { Self::Inactive }
    }

    /// Value of the stored `is_active` flag.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for PinStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_mapping() {
        assert_eq!(PinStatus::from_is_active(true), PinStatus::Active);
        assert_eq!(PinStatus::from_is_active(false), PinStatus::Inactive);
        assert!(PinStatus::Active.is_active());
        assert!(!PinStatus::Inactive.is_active());
    }

    #[test]
    fn test_default_is_active() {
        assert_eq!(PinStatus::default(), PinStatus::Active);
    }
}
