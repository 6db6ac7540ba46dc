//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::action::AuditAction;

/// Longest stored entity reference.
pub const MAX_ENTITY_ID_LEN: usize = 500;
/// Longest stored details text.
pub const MAX_DETAILS_LEN: usize = 1000;

/// An immutable record of a change inside a team.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Team the change happened in.
    pub team_id: Uuid,
    /// Acting user.
    pub user_id: Uuid,
    /// What happened.
    pub action: AuditAction,
    /// Identifier of the affected entity.
    pub entity_id: Option<String>,
    /// Free-text details.
    pub details: Option<String>,
    /// When the change happened.
    pub created_at: DateTime<Utc>,
}

/// An audit entry joined with the acting user's email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogView {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Acting user.
    pub user_id: Uuid,
    /// Acting user's email, when the account still exists.
    pub user_email: Option<String>,
    /// What happened.
    pub action: AuditAction,
    /// Identifier of the affected entity.
    pub entity_id: Option<String>,
    /// Free-text details.
    pub details: Option<String>,
    /// When the change happened.
    pub created_at: DateTime<Utc>,
}

/// Data required to append an audit entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLogEntry {
    /// Team.
    pub team_id: Uuid,
    /// Acting user.
    pub user_id: Uuid,
    /// Action.
    pub action: AuditAction,
    /// Affected entity.
    pub entity_id: Option<String>,
    /// Details.
    pub details: Option<String>,
}

impl CreateAuditLogEntry {
    /// Start an entry for an action.
    pub fn new(team_id: Uuid, user_id: Uuid, action: AuditAction) -> Self {
        Self {
            team_id,
            user_id,
            action,
            entity_id: None,
            details: None,
        }
    }

    /// Attach the affected entity id.
    pub fn entity(mut self, entity_id: impl ToString) -> Self {
        self.entity_id = Some(truncate(entity_id.to_string(), MAX_ENTITY_ID_LEN));
        self
    }

    /// Attach details text.
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(truncate(details.into(), MAX_DETAILS_LEN));
        self
    }

    /// Materialize the entry row.
    pub fn into_entry(self) -> AuditLogEntry {
        AuditLogEntry {
            id: Uuid::new_v4(),
            team_id: self.team_id,
            user_id: self.user_id,
            action: self.action,
            entity_id: self.entity_id,
            details: self.details,
            created_at: Utc::now(),
        }
    }
}

fn truncate(mut value: String, max_chars: usize) -> String {
    if let Some((idx, _)) = value.char_indices().nth(max_chars) {
        value.truncate(idx);
    }
    value
}
