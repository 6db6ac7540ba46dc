//! Team and team member entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::grant::TeamRoleGrant;
use super::role::TeamBaseRole;

/// A team of users sharing a board and documents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Unique team identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Current owner (mirrors the member holding `Owner`).
    pub owner_id: Uuid,
    /// When the team was created.
    pub created_at: DateTime<Utc>,
}

/// Links a user to a team with a base role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Unique membership identifier.
    pub id: Uuid,
    /// The team.
    pub team_id: Uuid,
    /// The user.
    pub user_id: Uuid,
    /// Base role within the team.
    pub base_role: TeamBaseRole,
    /// Inactive members are treated as non-members.
    pub is_active: bool,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

impl TeamMember {
    /// Build a new active membership.
    pub fn new(team_id: Uuid, user_id: Uuid, base_role: TeamBaseRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            base_role,
            is_active: true,
            joined_at: Utc::now(),
        }
    }
}

/// An active membership together with its grants, as loaded for an
/// access check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    /// The membership row.
    pub member: TeamMember,
    /// Grants held by the member.
    pub grants: Vec<TeamRoleGrant>,
}

impl Membership {
    /// The member's base role.
    pub fn role(&self) -> TeamBaseRole {
        self.member.base_role
    }
}

/// A team as listed for one of its members.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    /// Team identifier.
    pub team_id: Uuid,
    /// Team name.
    pub name: String,
    /// The listing member's role.
    pub role: TeamBaseRole,
}

/// A member joined with the user's profile and grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    /// Membership identifier.
    pub id: Uuid,
    /// User identifier.
    pub user_id: Uuid,
    /// User email.
    pub email: String,
    /// User display name.
    pub full_name: String,
    /// Base role.
    pub role: TeamBaseRole,
    /// Active flag.
    pub is_active: bool,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
    /// Grants held by the member.
    pub grants: Vec<TeamRoleGrant>,
}
