//! User-visible notices (modal dialogs in the browser)

use serde::{Deserialize, Serialize};

/// Severity of a notice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A notice shown to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            text: text.into(),
        }
    }

    /// Confirmation after the backend accepted a crop
    pub fn registered(message: impl Into<String>) -> Self {
        Self::success("The results are ready, you can visit them.", message)
    }

    /// The backend reported a duplicate-key conflict
    pub fn duplicate_record() -> Self {
        Self::error("Could not obtain information.")
    }

    /// Transport or server failure while registering
    pub fn registration_failed() -> Self {
        Self::error("There was a problem registering the data.")
    }

    pub fn location_denied() -> Self {
        Self::error("Could not obtain your location.")
    }

    pub fn geolocation_unsupported() -> Self {
        Self::error("Geolocation is not supported by this browser.")
    }
}
