//! Team audit log repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use teamboard_core::result::AppResult;
use teamboard_entity::audit::{AuditLogEntry, AuditLogView};

use super::db_error;

/// Append-only storage for team audit entries.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Append an entry.
    async fn insert(&self, entry: AuditLogEntry) -> AppResult<()>;

    /// Most recent entries of a team, newest first.
    async fn list_recent(&self, team_id: Uuid, limit: u32) -> AppResult<Vec<AuditLogView>>;
}

/// PostgreSQL audit repository.
#[derive(Debug, Clone)]
pub struct PgAuditRepository {
    pool: PgPool,
}

impl PgAuditRepository {
    /// Create a new audit repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PgAuditRepository {
    async fn insert(&self, entry: AuditLogEntry) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO team_audit_logs
                (id, team_id, user_id, action, entity_id, details, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(entry.id)
        .bind(entry.team_id)
        .bind(entry.user_id)
        .bind(entry.action)
        .bind(&entry.entity_id)
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to write audit entry"))?;
        Ok(())
    }

    async fn list_recent(&self, team_id: Uuid, limit: u32) -> AppResult<Vec<AuditLogView>> {
        sqlx::query_as::<_, AuditLogView>(
            r#"SELECT a.id, a.user_id, u.email AS user_email, a.action, a.entity_id,
                      a.details, a.created_at
               FROM team_audit_logs a
               LEFT JOIN users u ON u.id = a.user_id
               WHERE a.team_id = $1
               ORDER BY a.created_at DESC
               LIMIT $2"#,
        )
        .bind(team_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list audit entries"))
    }
}
