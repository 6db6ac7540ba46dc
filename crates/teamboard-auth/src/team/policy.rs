//! Pure role/grant evaluation.

use teamboard_entity::team::{GrantType, TeamBaseRole, TeamRoleGrant};

/// Well-known scopes checked by the services. Grants may name any scope.
pub mod scopes {
    /// Create and edit team tasks.
    pub const TASKS_WRITE: &str = "tasks:write";
    /// Delete team tasks created by someone else.
    pub const TASKS_DELETE: &str = "tasks:delete";
    /// Create, edit, reorder, and delete team board columns.
    pub const COLUMNS_WRITE: &str = "columns:write";
    /// Upload team documents.
    pub const DOCUMENTS_WRITE: &str = "documents:write";
    /// Delete team documents uploaded by someone else.
    pub const DOCUMENTS_DELETE: &str = "documents:delete";
}

/// Decide whether a member with `role` and `grants` may act on `scope`.
///
/// Owners and Managers are allowed everything. A Contributor needs an
/// Allow grant whose scope equals `scope` exactly. Deny grants are not
/// consulted.
pub fn is_allowed(role: TeamBaseRole, grants: &[TeamRoleGrant], scope: &str) -> bool {
    match role {
        TeamBaseRole::Owner | TeamBaseRole::Manager => true,
        TeamBaseRole::Contributor => grants
            .iter()
            .any(|g| g.grant_type == GrantType::Allow && g.scope == scope),
    }
}
