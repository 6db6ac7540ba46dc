//! Team invite repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_entity::team::{
    CreateInvite, InviteStatus, PendingInvite, TeamBaseRole, TeamInvite, TeamMember,
};

use super::{db_error, violates};

/// Storage for team invites.
#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Insert a pending invite. Fails with `Conflict` when one is already
    /// pending for the same team and email.
    async fn create(&self, data: CreateInvite) -> AppResult<TeamInvite>;

    /// Find an invite by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TeamInvite>>;

    /// The pending invite for an email in a team, expired or not.
    async fn find_pending(&self, team_id: Uuid, email: &str) -> AppResult<Option<TeamInvite>>;

    /// Pending, unexpired invites addressed to an email.
    async fn list_open_for_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<PendingInvite>>;

    /// Every invite of a team, newest first.
    async fn list_for_team(&self, team_id: Uuid) -> AppResult<Vec<TeamInvite>>;

    /// Move a still-pending invite to a final status.
    ///
    /// Returns `None` when the invite no longer exists or is not pending.
    async fn close(
        &self,
        id: Uuid,
        status: InviteStatus,
        responded_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<TeamInvite>>;

    /// Accept a pending invite for `user_id` in one unit: the invite becomes
    /// Accepted and the user gains (or regains) an active Contributor
    /// membership. An existing membership keeps its role.
    async fn accept(&self, id: Uuid, user_id: Uuid) -> AppResult<TeamMember>;
}

/// PostgreSQL invite repository.
#[derive(Debug, Clone)]
pub struct PgInviteRepository {
    pool: PgPool,
}

impl PgInviteRepository {
    /// Create a new invite repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteRepository for PgInviteRepository {
    async fn create(&self, data: CreateInvite) -> AppResult<TeamInvite> {
        let invite = data.into_invite();
        sqlx::query_as::<_, TeamInvite>(
            r#"INSERT INTO team_invites
                (id, team_id, email, invited_by_user_id, status, created_at, expires_at, responded_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, NULL)
               RETURNING *"#,
        )
        .bind(invite.id)
        .bind(invite.team_id)
        .bind(&invite.email)
        .bind(invite.invited_by_user_id)
        .bind(invite.status)
        .bind(invite.created_at)
        .bind(invite.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "team_invites_pending_email_key") {
                AppError::conflict(format!(
                    "An invite is already pending for '{}'",
                    invite.email
                ))
            } else {
                db_error("Failed to create invite")(e)
            }
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TeamInvite>> {
        sqlx::query_as::<_, TeamInvite>("SELECT * FROM team_invites WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find invite"))
    }

    async fn find_pending(&self, team_id: Uuid, email: &str) -> AppResult<Option<TeamInvite>> {
        sqlx::query_as::<_, TeamInvite>(
            "SELECT * FROM team_invites WHERE team_id = $1 AND email = LOWER($2) AND status = $3",
        )
        .bind(team_id)
        .bind(email.trim())
        .bind(InviteStatus::Pending)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find pending invite"))
    }

    async fn list_open_for_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<PendingInvite>> {
        sqlx::query_as::<_, PendingInvite>(
            r#"SELECT i.*, t.name AS team_name
               FROM team_invites i
               JOIN teams t ON t.id = i.team_id
               WHERE i.email = LOWER($1) AND i.status = $2 AND i.expires_at > $3
               ORDER BY i.created_at DESC"#,
        )
        .bind(email.trim())
        .bind(InviteStatus::Pending)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list pending invites"))
    }

    async fn list_for_team(&self, team_id: Uuid) -> AppResult<Vec<TeamInvite>> {
        sqlx::query_as::<_, TeamInvite>(
            "SELECT * FROM team_invites WHERE team_id = $1 ORDER BY created_at DESC",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list team invites"))
    }

    async fn close(
        &self,
        id: Uuid,
        status: InviteStatus,
        responded_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<TeamInvite>> {
        sqlx::query_as::<_, TeamInvite>(
            r#"UPDATE team_invites SET status = $2, responded_at = $3
               WHERE id = $1 AND status = $4
               RETURNING *"#,
        )
        .bind(id)
        .bind(status)
        .bind(responded_at)
        .bind(InviteStatus::Pending)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update invite"))
    }

    async fn accept(&self, id: Uuid, user_id: Uuid) -> AppResult<TeamMember> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let invite = sqlx::query_as::<_, TeamInvite>(
            r#"UPDATE team_invites SET status = $2, responded_at = NOW()
               WHERE id = $1 AND status = $3
               RETURNING *"#,
        )
        .bind(id)
        .bind(InviteStatus::Accepted)
        .bind(InviteStatus::Pending)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to accept invite"))?
        .ok_or_else(|| AppError::validation("Invite is no longer pending"))?;

        let member = sqlx::query_as::<_, TeamMember>(
            r#"INSERT INTO team_members (id, team_id, user_id, base_role, is_active, joined_at)
               VALUES ($1, $2, $3, $4, TRUE, NOW())
               ON CONFLICT (team_id, user_id) DO UPDATE SET is_active = TRUE
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(invite.team_id)
        .bind(user_id)
        .bind(TeamBaseRole::Contributor)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to add member"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit invite acceptance"))?;

        Ok(member)
    }
}
