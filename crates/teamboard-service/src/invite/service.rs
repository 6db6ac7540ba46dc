//! Invite lifecycle: send, list, accept, reject, revoke.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use teamboard_auth::team::TeamAuthorizer;
use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_database::repositories::{InviteRepository, TeamRepository, UserRepository};
use teamboard_entity::audit::{AuditAction, CreateAuditLogEntry};
use teamboard_entity::team::{CreateInvite, InviteStatus, PendingInvite, TeamInvite, TeamMember};

use crate::audit::AuditService;
use crate::context::RequestContext;
use crate::text;

/// Manages invitations into teams.
#[derive(Clone)]
pub struct InviteService {
    invites: Arc<dyn InviteRepository>,
    teams: Arc<dyn TeamRepository>,
    users: Arc<dyn UserRepository>,
    authorizer: TeamAuthorizer,
    audit: AuditService,
    ttl: Duration,
}

impl InviteService {
    /// Creates a new invite service. Invites expire `ttl_days` after
    /// they are sent.
    pub fn new(
        invites: Arc<dyn InviteRepository>,
        teams: Arc<dyn TeamRepository>,
        users: Arc<dyn UserRepository>,
        authorizer: TeamAuthorizer,
        audit: AuditService,
        ttl_days: i64,
    ) -> Self {
        Self {
            invites,
            teams,
            users,
            authorizer,
            audit,
            ttl: Duration::days(ttl_days),
        }
    }

    /// Open invites addressed to the caller.
    pub async fn pending(&self, ctx: &RequestContext) -> AppResult<Vec<PendingInvite>> {
        self.invites
            .list_open_for_email(&ctx.email, Utc::now())
            .await
    }

    /// Invites an email into a team. Owner or Manager only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
        email: &str,
    ) -> AppResult<TeamInvite> {
        self.authorizer.authorize_admin(team_id, ctx.user_id).await?;
        let email = text::email(email)?;

        if let Some(user) = self.users.find_by_email(&email).await? {
            if self.teams.find_membership(team_id, user.id).await?.is_some() {
                return Err(AppError::conflict(format!(
                    "'{email}' is already a member of this team"
                )));
            }
        }

        if let Some(existing) = self.invites.find_pending(team_id, &email).await? {
            if existing.is_expired(Utc::now()) {
                self.invites
                    .close(existing.id, InviteStatus::Expired, None)
                    .await?;
            } else {
                return Err(AppError::conflict(format!(
                    "An invite is already pending for '{email}'"
                )));
            }
        }

        let invite = self
            .invites
            .create(CreateInvite {
                team_id,
                email,
                invited_by_user_id: ctx.user_id,
                ttl: self.ttl,
            })
            .await?;

        self.audit
            .record(
                CreateAuditLogEntry::new(team_id, ctx.user_id, AuditAction::InviteSent)
                    .entity(invite.id)
                    .details(&invite.email),
            )
            .await;

        info!(team_id = %team_id, invite_id = %invite.id, "Invite sent");

        Ok(invite)
    }

    /// Every invite of a team, newest first. Owner or Manager only.
    pub async fn list_for_team(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
    ) -> AppResult<Vec<TeamInvite>> {
        self.authorizer.authorize_admin(team_id, ctx.user_id).await?;
        self.invites.list_for_team(team_id).await
    }

    /// Joins the team of an invite addressed to the caller.
    pub async fn accept(&self, ctx: &RequestContext, invite_id: Uuid) -> AppResult<TeamMember> {
        let invite = self.open_invite(invite_id).await?;
        if !invite.is_addressed_to(&ctx.email) {
            return Err(AppError::authorization("This invite is addressed to someone else"));
        }

        let member = self.invites.accept(invite.id, ctx.user_id).await?;

        self.audit
            .record(
                CreateAuditLogEntry::new(invite.team_id, ctx.user_id, AuditAction::InviteAccepted)
                    .entity(invite.id),
            )
            .await;
        self.audit
            .record(
                CreateAuditLogEntry::new(invite.team_id, ctx.user_id, AuditAction::MemberAdded)
                    .entity(member.id)
                    .details(&invite.email),
            )
            .await;

        info!(team_id = %invite.team_id, user_id = %ctx.user_id, "Invite accepted");

        Ok(member)
    }

    /// Declines an invite addressed to the caller. Expired invites cannot be
    /// declined any more than accepted.
    pub async fn reject(&self, ctx: &RequestContext, invite_id: Uuid) -> AppResult<TeamInvite> {
        let invite = self.open_invite(invite_id).await?;
        if !invite.is_addressed_to(&ctx.email) {
            return Err(AppError::authorization("This invite is addressed to someone else"));
        }

        let invite = self
            .invites
            .close(invite.id, InviteStatus::Revoked, Some(Utc::now()))
            .await?
            .ok_or_else(|| AppError::validation("Invite is no longer pending"))?;

        info!(team_id = %invite.team_id, invite_id = %invite.id, "Invite rejected");

        Ok(invite)
    }

    /// Withdraws a pending invite. Owner or Manager of its team only.
    pub async fn revoke(&self, ctx: &RequestContext, invite_id: Uuid) -> AppResult<TeamInvite> {
        let invite = self.find(invite_id).await?;
        self.authorizer
            .authorize_admin(invite.team_id, ctx.user_id)
            .await?;

        let invite = self
            .invites
            .close(invite.id, InviteStatus::Revoked, Some(Utc::now()))
            .await?
            .ok_or_else(|| AppError::validation("Invite is no longer pending"))?;

        self.audit
            .record(
                CreateAuditLogEntry::new(invite.team_id, ctx.user_id, AuditAction::InviteRevoked)
                    .entity(invite.id)
                    .details(&invite.email),
            )
            .await;

        Ok(invite)
    }

    async fn find(&self, invite_id: Uuid) -> AppResult<TeamInvite> {
        self.invites
            .find_by_id(invite_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Invite {invite_id} not found")))
    }

    /// The invite if it is still pending and unexpired. A pending invite
    /// past its expiry is marked Expired on the way out.
    async fn open_invite(&self, invite_id: Uuid) -> AppResult<TeamInvite> {
        let invite = self.find(invite_id).await?;
        if invite.status != InviteStatus::Pending {
            return Err(AppError::validation("Invite is no longer pending"));
        }
        if invite.is_expired(Utc::now()) {
            self.invites
                .close(invite.id, InviteStatus::Expired, None)
                .await?;
            return Err(AppError::validation("Invite has expired"));
        }
        Ok(invite)
    }
}
