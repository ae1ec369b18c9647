//! Registration endpoint models

use serde::{Deserialize, Serialize};

/// Body code the backend uses for a duplicate-key conflict
pub const DUPLICATE_KEY_CODE: i64 = 11000;

/// Body of a `POST /register` response
///
/// A conflict comes back with a success status and `code` set, so both
/// fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

impl RegisterResponse {
    pub fn is_duplicate(&self) -> bool {
        self.code == Some(DUPLICATE_KEY_CODE)
    }
}

/// Interpreted result of a registration request that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered { message: String },
    Duplicate,
}

impl From<RegisterResponse> for RegisterOutcome {
    fn from(response: RegisterResponse) -> Self {
        if response.is_duplicate() {
            RegisterOutcome::Duplicate
        } else {
            RegisterOutcome::Registered {
                message: response.message.unwrap_or_default(),
            }
        }
    }
}
