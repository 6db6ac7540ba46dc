//! Audited team actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of change recorded in a team's audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_action")]
pub enum AuditAction {
    TeamCreated,
    TeamUpdated,
    MemberAdded,
    MemberRemoved,
    MemberRoleChanged,
    InviteSent,
    InviteAccepted,
    InviteRevoked,
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    DocumentUploaded,
    DocumentDeleted,
    OwnershipTransferred,
}

impl AuditAction {
    /// Return the action name as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TeamCreated => "TeamCreated",
            Self::TeamUpdated => "TeamUpdated",
            Self::MemberAdded => "MemberAdded",
            Self::MemberRemoved => "MemberRemoved",
            Self::MemberRoleChanged => "MemberRoleChanged",
            Self::InviteSent => "InviteSent",
            Self::InviteAccepted => "InviteAccepted",
            Self::InviteRevoked => "InviteRevoked",
            Self::TaskCreated => "TaskCreated",
            Self::TaskUpdated => "TaskUpdated",
            Self::TaskDeleted => "TaskDeleted",
            Self::DocumentUploaded => "DocumentUploaded",
            Self::DocumentDeleted => "DocumentDeleted",
            Self::OwnershipTransferred => "OwnershipTransferred",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
