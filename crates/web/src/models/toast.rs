//! One-shot notifications.
//!
//! A handler stores a `Toast` in the session before redirecting; the next page
//! render takes it out and shows it once.

use serde::{Deserialize, Serialize};

/// Visual style of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A notification with a title and a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    /// A success/info notification.
    #[must_use]
    pub fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            variant: ToastVariant::Default,
        }
    }

    /// An error notification.
    #[must_use]
    pub fn error(title: &str, description: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            variant: ToastVariant::Destructive,
        }
    }

    /// Whether this is an error notification.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}
