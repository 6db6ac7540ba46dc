//! Membership lookup plus policy evaluation for team-scoped requests.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_database::repositories::TeamRepository;
use teamboard_entity::team::{Membership, TeamBaseRole};

use super::policy::is_allowed;

/// Resolves the caller's membership for a team.
///
/// Memberships are read from the store on every call.
#[derive(Clone)]
pub struct TeamAuthorizer {
    teams: Arc<dyn TeamRepository>,
}

impl std::fmt::Debug for TeamAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamAuthorizer").finish_non_exhaustive()
    }
}

impl TeamAuthorizer {
    /// Creates an authorizer over the team repository.
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }

    /// Load the caller's active membership.
    ///
    /// A missing team and a non-member caller both yield `NotFound`.
    pub async fn membership(&self, team_id: Uuid, user_id: Uuid) -> AppResult<TeamAccess> {
        self.teams
            .find_membership(team_id, user_id)
            .await?
            .map(|membership| TeamAccess { membership })
            .ok_or_else(|| AppError::not_found(format!("Team {team_id} not found")))
    }

    /// Load the membership and require `scope` in one step.
    pub async fn authorize(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        scope: &str,
    ) -> AppResult<TeamAccess> {
        let access = self.membership(team_id, user_id).await?;
        if let Err(e) = access.require(scope) {
            debug!(team_id = %team_id, user_id = %user_id, scope, role = %access.role(), "Permission denied");
            return Err(e);
        }
        Ok(access)
    }

    /// Load the membership and require an administrative role.
    pub async fn authorize_admin(&self, team_id: Uuid, user_id: Uuid) -> AppResult<TeamAccess> {
        let access = self.membership(team_id, user_id).await?;
        access.require_admin()?;
        Ok(access)
    }
}

/// A confirmed membership. Failed checks from here on are `Authorization`
/// errors.
#[derive(Debug, Clone)]
pub struct TeamAccess {
    membership: Membership,
}

impl TeamAccess {
    /// The caller's base role.
    pub fn role(&self) -> TeamBaseRole {
        self.membership.role()
    }

    /// Owner or Manager.
    pub fn is_admin(&self) -> bool {
        self.role().is_administrative()
    }

    /// Whether the membership permits `scope`.
    pub fn can(&self, scope: &str) -> bool {
        is_allowed(self.role(), &self.membership.grants, scope)
    }

    /// Fail with `Authorization` unless the membership permits `scope`.
    pub fn require(&self, scope: &str) -> AppResult<()> {
        if self.can(scope) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Missing permission '{scope}' in this team"
            )))
        }
    }

    /// Fail with `Authorization` unless the caller is Owner or Manager.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Only team owners and managers can perform this action",
            ))
        }
    }

    /// Fail with `Authorization` unless the caller is the Owner.
    pub fn require_owner(&self) -> AppResult<()> {
        if self.role() == TeamBaseRole::Owner {
            Ok(())
        } else {
            Err(AppError::authorization("Only the team owner can perform this action"))
        }
    }
}
