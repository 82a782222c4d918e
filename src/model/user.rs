//! User profile types.

use serde::{Deserialize, Serialize};

/// A registered forum user.
///
/// Nicknames are unique case-insensitively; the casing given at registration
/// is preserved on output. Emails are unique case-insensitively as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub nickname: String,
    pub fullname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub email: String,
}

/// Body of `POST /api/user/{nickname}/create`; the nickname comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub fullname: String,
    #[serde(default)]
    pub about: Option<String>,
    pub email: String,
}

/// Partial profile update. Missing fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
