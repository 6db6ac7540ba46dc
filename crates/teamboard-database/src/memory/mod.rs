//! In-memory implementations of every repository trait.
//!
//! Independent tables are `DashMap`s. The team aggregate (teams, members,
//! grants, invites) sits behind one `RwLock` so multi-row changes such as
//! ownership transfer and invite acceptance happen in a single critical
//! section.

mod boards;
mod documents;
mod teams;
mod users;

use std::collections::HashMap;

use dashmap::DashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use teamboard_entity::audit::AuditLogEntry;
use teamboard_entity::card::Card;
use teamboard_entity::column::BoardColumn;
use teamboard_entity::document::Document;
use teamboard_entity::task::Task;
use teamboard_entity::team::{Team, TeamInvite, TeamMember, TeamRoleGrant};
use teamboard_entity::user::User;

/// Process-local store. Cloning the `Arc` around it shares the data.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    /// Lower-cased email to user id; guards email uniqueness.
    emails: DashMap<String, Uuid>,
    teams: RwLock<TeamTables>,
    tasks: DashMap<Uuid, Task>,
    columns: DashMap<String, Vec<BoardColumn>>,
    cards: DashMap<Uuid, Card>,
    documents: DashMap<Uuid, Document>,
    audit: RwLock<Vec<AuditLogEntry>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn user_contact(&self, user_id: Uuid) -> Option<(String, String)> {
        self.users
            .get(&user_id)
            .map(|u| (u.email.clone(), u.full_name.clone()))
    }
}

#[derive(Debug, Default)]
struct TeamTables {
    teams: HashMap<Uuid, Team>,
    members: HashMap<Uuid, TeamMember>,
    grants: HashMap<Uuid, TeamRoleGrant>,
    invites: HashMap<Uuid, TeamInvite>,
}

impl TeamTables {
    fn member_by_user(&self, team_id: Uuid, user_id: Uuid) -> Option<&TeamMember> {
        self.members
            .values()
            .find(|m| m.team_id == team_id && m.user_id == user_id)
    }

    fn grants_of(&self, member_id: Uuid) -> Vec<TeamRoleGrant> {
        let mut grants: Vec<TeamRoleGrant> = self
            .grants
            .values()
            .filter(|g| g.team_member_id == member_id)
            .cloned()
            .collect();
        grants.sort_by_key(|g| g.created_at);
        grants
    }
}
