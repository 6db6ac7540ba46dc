//! Team lifecycle and member administration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use teamboard_auth::team::TeamAuthorizer;
use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_database::repositories::TeamRepository;
use teamboard_entity::audit::{AuditAction, CreateAuditLogEntry};
use teamboard_entity::team::{
    GrantType, MemberSummary, Team, TeamBaseRole, TeamMember, TeamRoleGrant, TeamSummary,
};

use crate::audit::AuditService;
use crate::context::RequestContext;
use crate::text;

const MAX_NAME_LEN: usize = 200;
const MAX_SCOPE_LEN: usize = 200;

/// A team as seen by one of its members.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetail {
    /// Team fields.
    #[serde(flatten)]
    pub team: Team,
    /// The caller's role.
    pub role: TeamBaseRole,
    /// Members with their grants.
    pub members: Vec<MemberSummary>,
}

/// Manages teams and their members.
#[derive(Clone)]
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    authorizer: TeamAuthorizer,
    audit: AuditService,
}

impl TeamService {
    /// Creates a new team service.
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        authorizer: TeamAuthorizer,
        audit: AuditService,
    ) -> Self {
        Self {
            teams,
            authorizer,
            audit,
        }
    }

    /// Creates a team owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> AppResult<Team> {
        let name = text::required("Team name", name, MAX_NAME_LEN)?;
        let (team, _) = self.teams.create_with_owner(&name, ctx.user_id).await?;

        self.audit
            .record(
                CreateAuditLogEntry::new(team.id, ctx.user_id, AuditAction::TeamCreated)
                    .entity(team.id)
                    .details(&team.name),
            )
            .await;

        info!(team_id = %team.id, user_id = %ctx.user_id, "Team created");

        Ok(team)
    }

    /// Teams the caller is an active member of.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<TeamSummary>> {
        self.teams.list_for_user(ctx.user_id).await
    }

    /// Team detail with members. Members only.
    pub async fn get(&self, ctx: &RequestContext, team_id: Uuid) -> AppResult<TeamDetail> {
        let access = self.authorizer.membership(team_id, ctx.user_id).await?;
        let team = self.find_team(team_id).await?;
        let members = self.teams.list_members(team_id).await?;

        Ok(TeamDetail {
            team,
            role: access.role(),
            members,
        })
    }

    /// Renames a team. Owner or Manager only.
    pub async fn rename(&self, ctx: &RequestContext, team_id: Uuid, name: &str) -> AppResult<Team> {
        self.authorizer.authorize_admin(team_id, ctx.user_id).await?;
        let name = text::required("Team name", name, MAX_NAME_LEN)?;

        let team = self
            .teams
            .rename(team_id, &name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Team {team_id} not found")))?;

        self.audit
            .record(
                CreateAuditLogEntry::new(team_id, ctx.user_id, AuditAction::TeamUpdated)
                    .entity(team_id)
                    .details(format!("Renamed to '{}'", team.name)),
            )
            .await;

        Ok(team)
    }

    /// Members of a team. Members only.
    pub async fn members(&self, ctx: &RequestContext, team_id: Uuid) -> AppResult<Vec<MemberSummary>> {
        self.authorizer.membership(team_id, ctx.user_id).await?;
        self.teams.list_members(team_id).await
    }

    /// Removes a member. The owner cannot be removed.
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
        member_id: Uuid,
    ) -> AppResult<()> {
        self.authorizer.authorize_admin(team_id, ctx.user_id).await?;
        let member = self.find_member(team_id, member_id).await?;

        if member.base_role == TeamBaseRole::Owner {
            return Err(AppError::validation(
                "The team owner cannot be removed; transfer ownership first",
            ));
        }

        if !self.teams.remove_member(member_id).await? {
            return Err(AppError::not_found(format!("Member {member_id} not found")));
        }

        self.audit
            .record(
                CreateAuditLogEntry::new(team_id, ctx.user_id, AuditAction::MemberRemoved)
                    .entity(member.user_id),
            )
            .await;

        info!(team_id = %team_id, member_id = %member_id, "Member removed");

        Ok(())
    }

    /// Changes a member's base role. Owner is neither granted nor revoked
    /// here.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
        member_id: Uuid,
        role: &str,
    ) -> AppResult<TeamMember> {
        self.authorizer.authorize_admin(team_id, ctx.user_id).await?;
        let member = self.find_member(team_id, member_id).await?;

        if member.base_role == TeamBaseRole::Owner {
            return Err(AppError::validation(
                "The owner's role changes only through ownership transfer",
            ));
        }
        let role: TeamBaseRole = role.parse()?;
        if role == TeamBaseRole::Owner {
            return Err(AppError::validation(
                "Use ownership transfer to make a member the owner",
            ));
        }

        let previous = member.base_role;
        let updated = self
            .teams
            .update_member_role(member_id, role)
            .await?
            .ok_or_else(|| {
                AppError::validation("The owner's role changes only through ownership transfer")
            })?;

        self.audit
            .record(
                CreateAuditLogEntry::new(team_id, ctx.user_id, AuditAction::MemberRoleChanged)
                    .entity(updated.user_id)
                    .details(format!("{previous} -> {role}")),
            )
            .await;

        info!(team_id = %team_id, member_id = %member_id, role = %role, "Member role changed");

        Ok(updated)
    }

    /// Hands the team to another active member. Caller must be the owner.
    pub async fn transfer_ownership(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
        new_owner_id: Uuid,
    ) -> AppResult<Team> {
        let access = self.authorizer.membership(team_id, ctx.user_id).await?;
        access.require_owner()?;

        let team = self
            .teams
            .transfer_ownership(team_id, ctx.user_id, new_owner_id)
            .await?;

        self.audit
            .record(
                CreateAuditLogEntry::new(team_id, ctx.user_id, AuditAction::OwnershipTransferred)
                    .entity(new_owner_id),
            )
            .await;

        info!(team_id = %team_id, from = %ctx.user_id, to = %new_owner_id, "Ownership transferred");

        Ok(team)
    }

    /// Creates or replaces a member's grant for a scope.
    pub async fn set_grant(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
        member_id: Uuid,
        scope: &str,
        grant_type: GrantType,
    ) -> AppResult<TeamRoleGrant> {
        self.authorizer.authorize_admin(team_id, ctx.user_id).await?;
        self.find_member(team_id, member_id).await?;
        let scope = text::required("Scope", scope, MAX_SCOPE_LEN)?;

        let grant = self.teams.upsert_grant(member_id, &scope, grant_type).await?;

        info!(team_id = %team_id, member_id = %member_id, scope = %scope, grant_type = %grant_type, "Grant set");

        Ok(grant)
    }

    /// Deletes one grant of a member.
    pub async fn delete_grant(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
        member_id: Uuid,
        grant_id: Uuid,
    ) -> AppResult<()> {
        self.authorizer.authorize_admin(team_id, ctx.user_id).await?;
        self.find_member(team_id, member_id).await?;

        if !self.teams.delete_grant(member_id, grant_id).await? {
            return Err(AppError::not_found(format!("Grant {grant_id} not found")));
        }

        info!(team_id = %team_id, member_id = %member_id, grant_id = %grant_id, "Grant deleted");

        Ok(())
    }

    async fn find_team(&self, team_id: Uuid) -> AppResult<Team> {
        self.teams
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Team {team_id} not found")))
    }

    async fn find_member(&self, team_id: Uuid, member_id: Uuid) -> AppResult<TeamMember> {
        self.teams
            .find_member(team_id, member_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Member {member_id} not found")))
    }
}
