//! Team, membership, grant, and invite entities.

pub mod grant;
pub mod invite;
pub mod model;
pub mod role;

pub use grant::{GrantType, TeamRoleGrant};
pub use invite::{CreateInvite, InviteStatus, PendingInvite, TeamInvite};
pub use model::{Membership, MemberSummary, Team, TeamMember, TeamSummary};
pub use role::TeamBaseRole;
