//! Team invite entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Lifecycle state of an invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invite_status")]
pub enum InviteStatus {
    /// Waiting for the addressee.
    Pending,
    /// The addressee joined the team.
    Accepted,
    /// Rejected by the addressee or withdrawn by a team administrator.
    Revoked,
    /// Passed its expiry while pending.
    Expired,
}

impl InviteStatus {
    /// Return the status name as serialized on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Revoked => "Revoked",
            Self::Expired => "Expired",
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An invitation for an email address to join a team.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamInvite {
    /// Unique invite identifier.
    pub id: Uuid,
    /// Target team.
    pub team_id: Uuid,
    /// Addressee email, lower-cased.
    pub email: String,
    /// Member who sent the invite.
    pub invited_by_user_id: Uuid,
    /// Current status.
    pub status: InviteStatus,
    /// When the invite was sent.
    pub created_at: DateTime<Utc>,
    /// When a pending invite stops being valid.
    pub expires_at: DateTime<Utc>,
    /// When the addressee or an administrator responded.
    pub responded_at: Option<DateTime<Utc>>,
}

impl TeamInvite {
    /// Whether the invite is past its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether the invite can still be accepted.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.status == InviteStatus::Pending && !self.is_expired(now)
    }

    /// Case-insensitive addressee check.
    pub fn is_addressed_to(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

/// A pending invite together with the name of its team.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PendingInvite {
    /// The invite.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub invite: TeamInvite,
    /// Name of the inviting team.
    pub team_name: String,
}

/// Data required to create a pending invite.
#[derive(Debug, Clone)]
pub struct CreateInvite {
    /// Target team.
    pub team_id: Uuid,
    /// Addressee email, already normalized.
    pub email: String,
    /// Sender.
    pub invited_by_user_id: Uuid,
    /// Validity window.
    pub ttl: Duration,
}

impl CreateInvite {
    /// Materialize the invite row.
    pub fn into_invite(self) -> TeamInvite {
        let now = Utc::now();
        TeamInvite {
            id: Uuid::new_v4(),
            team_id: self.team_id,
            email: self.email,
            invited_by_user_id: self.invited_by_user_id,
            status: InviteStatus::Pending,
            created_at: now,
            expires_at: now + self.ttl,
            responded_at: None,
        }
    }
}
