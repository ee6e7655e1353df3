//! Authenticated user record.

use crate::de::opt_text;
use serde::{Deserialize, Serialize};

/// User returned by `POST /api/login` and kept in the local session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<crate::RecordId>,
    pub username: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub role: Option<String>,
}

impl User {
    /// Name shown in the header, falling back to the login id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

/// Credentials for `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
