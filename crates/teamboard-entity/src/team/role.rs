//! Team base role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use teamboard_core::AppError;

/// Base role of a team member.
///
/// Ordered by decreasing privilege: Owner > Manager > Contributor. Exactly
/// one active member of a team holds `Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "team_base_role")]
pub enum TeamBaseRole {
    /// Holder of the team; changes only through ownership transfer.
    Owner,
    /// Administers members, invites, and grants.
    Manager,
    /// Regular member; resource writes need explicit grants.
    Contributor,
}

impl TeamBaseRole {
    /// Owners and Managers may perform administrative actions.
    pub fn is_administrative(&self) -> bool {
        matches!(self, Self::Owner | Self::Manager)
    }

    /// Return the role name as serialized on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Manager => "Manager",
            Self::Contributor => "Contributor",
        }
    }
}

impl fmt::Display for TeamBaseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TeamBaseRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "manager" => Ok(Self::Manager),
            "contributor" => Ok(Self::Contributor),
            _ => Err(AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: Owner, Manager, Contributor"
            ))),
        }
    }
}
