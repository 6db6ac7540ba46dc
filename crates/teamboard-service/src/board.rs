//! Resolution of the board a task or column request targets.

use uuid::Uuid;

use teamboard_auth::team::{TeamAccess, TeamAuthorizer};
use teamboard_core::result::AppResult;
use teamboard_entity::board::BoardScope;

use crate::context::RequestContext;

/// The target board plus the caller's team membership when the board
/// belongs to a team.
#[derive(Debug, Clone)]
pub struct BoardAccess {
    scope: BoardScope,
    team: Option<TeamAccess>,
}

impl BoardAccess {
    /// Personal board without a team, team board with one. A team board
    /// requires an active membership (`NotFound` otherwise).
    pub async fn resolve(
        authorizer: &TeamAuthorizer,
        ctx: &RequestContext,
        team_id: Option<Uuid>,
    ) -> AppResult<Self> {
        match team_id {
            None => Ok(Self {
                scope: BoardScope::Personal(ctx.user_id),
                team: None,
            }),
            Some(team_id) => Ok(Self {
                scope: BoardScope::Team(team_id),
                team: Some(authorizer.membership(team_id, ctx.user_id).await?),
            }),
        }
    }

    /// The board.
    pub fn scope(&self) -> &BoardScope {
        &self.scope
    }

    /// Fail with `Authorization` unless the team membership permits
    /// `scope`. Personal boards permit everything.
    pub fn require(&self, scope: &str) -> AppResult<()> {
        match &self.team {
            Some(access) => access.require(scope),
            None => Ok(()),
        }
    }
}
