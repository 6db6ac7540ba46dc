//! Best-effort audit recording and team audit listing.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use teamboard_auth::team::TeamAuthorizer;
use teamboard_core::config::AuditConfig;
use teamboard_core::result::AppResult;
use teamboard_database::repositories::AuditRepository;
use teamboard_entity::audit::{AuditLogView, CreateAuditLogEntry};

use crate::context::RequestContext;

/// Writes and reads the team audit log.
#[derive(Clone)]
pub struct AuditService {
    audit: Arc<dyn AuditRepository>,
    authorizer: TeamAuthorizer,
    config: AuditConfig,
}

impl AuditService {
    /// Creates a new audit service.
    pub fn new(
        audit: Arc<dyn AuditRepository>,
        authorizer: TeamAuthorizer,
        config: AuditConfig,
    ) -> Self {
        Self {
            audit,
            authorizer,
            config,
        }
    }

    /// Append an entry. Failures are logged and swallowed.
    pub async fn record(&self, entry: CreateAuditLogEntry) {
        let action = entry.action;
        let team_id = entry.team_id;
        if let Err(e) = self.audit.insert(entry.into_entry()).await {
            warn!(team_id = %team_id, action = action.as_str(), error = %e, "Failed to write audit entry");
        }
    }

    /// Recent entries of a team, newest first. Members only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
        limit: Option<u32>,
    ) -> AppResult<Vec<AuditLogView>> {
        self.authorizer.membership(team_id, ctx.user_id).await?;
        self.audit
            .list_recent(team_id, self.config.clamp(limit))
            .await
    }
}
