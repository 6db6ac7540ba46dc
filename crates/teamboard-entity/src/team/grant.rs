//! Per-member scope grants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use teamboard_core::AppError;

/// Whether a grant allows or denies its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "grant_type")]
pub enum GrantType {
    /// Permits the scope.
    Allow,
    /// Recorded but not evaluated by the access check.
    Deny,
}

impl GrantType {
    /// Return the grant type name as serialized on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
        }
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GrantType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "deny" => Ok(Self::Deny),
            _ => Err(AppError::validation(format!(
                "Invalid grant type: '{s}'. Expected Allow or Deny"
            ))),
        }
    }
}

/// A `(scope, Allow|Deny)` pair attached to one team member.
///
/// Scopes are free-form strings such as `"documents:write"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamRoleGrant {
    /// Unique grant identifier.
    pub id: Uuid,
    /// The member holding the grant.
    pub team_member_id: Uuid,
    /// Permission scope.
    pub scope: String,
    /// Allow or Deny.
    pub grant_type: GrantType,
    /// When the grant was created or last replaced.
    pub created_at: DateTime<Utc>,
}

impl TeamRoleGrant {
    /// Build a new grant for a member.
    pub fn new(team_member_id: Uuid, scope: impl Into<String>, grant_type: GrantType) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_member_id,
            scope: scope.into(),
            grant_type,
            created_at: Utc::now(),
        }
    }

    /// Shorthand for an Allow grant.
    pub fn allow(team_member_id: Uuid, scope: impl Into<String>) -> Self {
        Self::new(team_member_id, scope, GrantType::Allow)
    }
}
