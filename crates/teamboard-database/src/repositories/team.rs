//! Team, membership, and grant repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_entity::team::{
    GrantType, MemberSummary, Membership, Team, TeamBaseRole, TeamMember, TeamRoleGrant,
    TeamSummary,
};

use super::db_error;

/// Storage for teams and everything hanging off a membership.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Create a team and its Owner membership in one unit.
    async fn create_with_owner(&self, name: &str, owner_id: Uuid) -> AppResult<(Team, TeamMember)>;

    /// Find a team by primary key.
    async fn find_by_id(&self, team_id: Uuid) -> AppResult<Option<Team>>;

    /// Rename a team.
    async fn rename(&self, team_id: Uuid, name: &str) -> AppResult<Option<Team>>;

    /// Teams the user is an active member of.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<TeamSummary>>;

    /// The user's active membership in the team, with grants.
    async fn find_membership(&self, team_id: Uuid, user_id: Uuid)
    -> AppResult<Option<Membership>>;

    /// A membership row of the given team, active or not.
    async fn find_member(&self, team_id: Uuid, member_id: Uuid) -> AppResult<Option<TeamMember>>;

    /// All members of a team joined with user profile and grants.
    async fn list_members(&self, team_id: Uuid) -> AppResult<Vec<MemberSummary>>;

    /// Delete a membership row (grants cascade).
    async fn remove_member(&self, member_id: Uuid) -> AppResult<bool>;

    /// Change a non-owner member's base role. Returns `None` when the row is
    /// gone or currently holds `Owner`.
    async fn update_member_role(
        &self,
        member_id: Uuid,
        role: TeamBaseRole,
    ) -> AppResult<Option<TeamMember>>;

    /// Atomically hand the Owner role from `current_owner` to `new_owner`.
    ///
    /// The previous owner becomes a Manager and the team's owner reference
    /// is updated. Fails without changes when `new_owner` is not an active
    /// member.
    async fn transfer_ownership(
        &self,
        team_id: Uuid,
        current_owner: Uuid,
        new_owner: Uuid,
    ) -> AppResult<Team>;

    /// Create or replace the member's grant for a scope.
    async fn upsert_grant(
        &self,
        member_id: Uuid,
        scope: &str,
        grant_type: GrantType,
    ) -> AppResult<TeamRoleGrant>;

    /// Delete one of the member's grants.
    async fn delete_grant(&self, member_id: Uuid, grant_id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL team repository.
#[derive(Debug, Clone)]
pub struct PgTeamRepository {
    pool: PgPool,
}

impl PgTeamRepository {
    /// Create a new team repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn grants_for(&self, member_ids: &[Uuid]) -> AppResult<Vec<TeamRoleGrant>> {
        sqlx::query_as::<_, TeamRoleGrant>(
            "SELECT * FROM team_role_grants WHERE team_member_id = ANY($1) ORDER BY created_at",
        )
        .bind(member_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load grants"))
    }
}

#[derive(FromRow)]
struct MemberRow {
    id: Uuid,
    user_id: Uuid,
    email: String,
    full_name: String,
    base_role: TeamBaseRole,
    is_active: bool,
    joined_at: DateTime<Utc>,
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn create_with_owner(&self, name: &str, owner_id: Uuid) -> AppResult<(Team, TeamMember)> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let team = sqlx::query_as::<_, Team>(
            "INSERT INTO teams (id, name, owner_id, created_at) VALUES ($1, $2, $3, NOW()) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to create team"))?;

        let member = sqlx::query_as::<_, TeamMember>(
            r#"INSERT INTO team_members (id, team_id, user_id, base_role, is_active, joined_at)
               VALUES ($1, $2, $3, $4, TRUE, NOW())
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(team.id)
        .bind(owner_id)
        .bind(TeamBaseRole::Owner)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to create owner membership"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit team creation"))?;

        Ok((team, member))
    }

    async fn find_by_id(&self, team_id: Uuid) -> AppResult<Option<Team>> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find team"))
    }

    async fn rename(&self, team_id: Uuid, name: &str) -> AppResult<Option<Team>> {
        sqlx::query_as::<_, Team>("UPDATE teams SET name = $2 WHERE id = $1 RETURNING *")
            .bind(team_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to rename team"))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<TeamSummary>> {
        sqlx::query_as::<_, TeamSummary>(
            r#"SELECT t.id AS team_id, t.name, m.base_role AS role
               FROM team_members m
               JOIN teams t ON t.id = m.team_id
               WHERE m.user_id = $1 AND m.is_active
               ORDER BY t.created_at"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list teams"))
    }

    async fn find_membership(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Membership>> {
        let member = sqlx::query_as::<_, TeamMember>(
            "SELECT * FROM team_members WHERE team_id = $1 AND user_id = $2 AND is_active",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find membership"))?;

        let Some(member) = member else {
            return Ok(None);
        };
        let grants = self.grants_for(&[member.id]).await?;
        Ok(Some(Membership { member, grants }))
    }

    async fn find_member(&self, team_id: Uuid, member_id: Uuid) -> AppResult<Option<TeamMember>> {
        sqlx::query_as::<_, TeamMember>(
            "SELECT * FROM team_members WHERE id = $1 AND team_id = $2",
        )
        .bind(member_id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find member"))
    }

    async fn list_members(&self, team_id: Uuid) -> AppResult<Vec<MemberSummary>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"SELECT m.id, m.user_id, u.email, u.full_name, m.base_role, m.is_active, m.joined_at
               FROM team_members m
               JOIN users u ON u.id = m.user_id
               WHERE m.team_id = $1
               ORDER BY m.joined_at"#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list members"))?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut grants: HashMap<Uuid, Vec<TeamRoleGrant>> = HashMap::new();
        for grant in self.grants_for(&ids).await? {
            grants.entry(grant.team_member_id).or_default().push(grant);
        }

        Ok(rows
            .into_iter()
            .map(|r| MemberSummary {
                grants: grants.remove(&r.id).unwrap_or_default(),
                id: r.id,
                user_id: r.user_id,
                email: r.email,
                full_name: r.full_name,
                role: r.base_role,
                is_active: r.is_active,
                joined_at: r.joined_at,
            })
            .collect())
    }

    async fn remove_member(&self, member_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(member_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to remove member"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_member_role(
        &self,
        member_id: Uuid,
        role: TeamBaseRole,
    ) -> AppResult<Option<TeamMember>> {
        sqlx::query_as::<_, TeamMember>(
            "UPDATE team_members SET base_role = $2 WHERE id = $1 AND base_role <> $3 RETURNING *",
        )
        .bind(member_id)
        .bind(role)
        .bind(TeamBaseRole::Owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update member role"))
    }

    async fn transfer_ownership(
        &self,
        team_id: Uuid,
        current_owner: Uuid,
        new_owner: Uuid,
    ) -> AppResult<Team> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let team = sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1 FOR UPDATE")
            .bind(team_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to lock team"))?
            .ok_or_else(|| AppError::not_found(format!("Team {team_id} not found")))?;

        if team.owner_id != current_owner {
            return Err(AppError::authorization(
                "Only the team owner can transfer ownership",
            ));
        }
        if new_owner == current_owner {
            return Err(AppError::validation("User already owns this team"));
        }

        let target = sqlx::query_as::<_, TeamMember>(
            "SELECT * FROM team_members WHERE team_id = $1 AND user_id = $2 AND is_active FOR UPDATE",
        )
        .bind(team_id)
        .bind(new_owner)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to lock target member"))?
        .ok_or_else(|| AppError::validation("New owner must be an active member of the team"))?;

        sqlx::query("UPDATE team_members SET base_role = $2 WHERE team_id = $1 AND base_role = $3")
            .bind(team_id)
            .bind(TeamBaseRole::Manager)
            .bind(TeamBaseRole::Owner)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to demote previous owner"))?;

        sqlx::query("UPDATE team_members SET base_role = $2 WHERE id = $1")
            .bind(target.id)
            .bind(TeamBaseRole::Owner)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to promote new owner"))?;

        let team = sqlx::query_as::<_, Team>(
            "UPDATE teams SET owner_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(team_id)
        .bind(new_owner)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to update team owner"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit ownership transfer"))?;

        Ok(team)
    }

    async fn upsert_grant(
        &self,
        member_id: Uuid,
        scope: &str,
        grant_type: GrantType,
    ) -> AppResult<TeamRoleGrant> {
        sqlx::query_as::<_, TeamRoleGrant>(
            r#"INSERT INTO team_role_grants (id, team_member_id, scope, grant_type, created_at)
               VALUES ($1, $2, $3, $4, NOW())
               ON CONFLICT (team_member_id, scope)
               DO UPDATE SET grant_type = EXCLUDED.grant_type, created_at = EXCLUDED.created_at
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(member_id)
        .bind(scope)
        .bind(grant_type)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to save grant"))
    }

    async fn delete_grant(&self, member_id: Uuid, grant_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM team_role_grants WHERE id = $1 AND team_member_id = $2")
                .bind(grant_id)
                .bind(member_id)
                .execute(&self.pool)
                .await
                .map_err(db_error("Failed to delete grant"))?;
        Ok(result.rows_affected() > 0)
    }
}
