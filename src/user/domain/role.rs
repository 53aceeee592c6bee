//! User role enumeration.

use super::ParseUserRoleError;
use serde::{Deserialize, Serialize};

/// Platform role held by a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// Regular contributor. The default for new users.
    #[default]
    Editor,
}

impl UserRole {
    /// Every role, in catalogue order.
    pub const ALL: [Self; 2] = [Self::Admin, Self::Editor];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
        }
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}
