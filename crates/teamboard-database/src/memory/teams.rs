use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_entity::team::{
    CreateInvite, GrantType, InviteStatus, MemberSummary, Membership, PendingInvite, Team,
    TeamBaseRole, TeamInvite, TeamMember, TeamRoleGrant, TeamSummary,
};

use super::MemoryStore;
use crate::repositories::{InviteRepository, TeamRepository};

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn create_with_owner(&self, name: &str, owner_id: Uuid) -> AppResult<(Team, TeamMember)> {
        let team = Team {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner_id,
            created_at: Utc::now(),
        };
        let member = TeamMember::new(team.id, owner_id, TeamBaseRole::Owner);

        let mut tables = self.teams.write().await;
        tables.teams.insert(team.id, team.clone());
        tables.members.insert(member.id, member.clone());
        Ok((team, member))
    }

    async fn find_by_id(&self, team_id: Uuid) -> AppResult<Option<Team>> {
        Ok(self.teams.read().await.teams.get(&team_id).cloned())
    }

    async fn rename(&self, team_id: Uuid, name: &str) -> AppResult<Option<Team>> {
        let mut tables = self.teams.write().await;
        Ok(tables.teams.get_mut(&team_id).map(|team| {
            team.name = name.to_string();
            team.clone()
        }))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<TeamSummary>> {
        let tables = self.teams.read().await;
        let mut teams: Vec<(DateTime<Utc>, TeamSummary)> = tables
            .members
            .values()
            .filter(|m| m.user_id == user_id && m.is_active)
            .filter_map(|m| {
                tables.teams.get(&m.team_id).map(|t| {
                    (
                        t.created_at,
                        TeamSummary {
                            team_id: t.id,
                            name: t.name.clone(),
                            role: m.base_role,
                        },
                    )
                })
            })
            .collect();
        teams.sort_by_key(|(created_at, _)| *created_at);
        Ok(teams.into_iter().map(|(_, summary)| summary).collect())
    }

    async fn find_membership(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Membership>> {
        let tables = self.teams.read().await;
        Ok(tables
            .member_by_user(team_id, user_id)
            .filter(|m| m.is_active)
            .map(|member| Membership {
                grants: tables.grants_of(member.id),
                member: member.clone(),
            }))
    }

    async fn find_member(&self, team_id: Uuid, member_id: Uuid) -> AppResult<Option<TeamMember>> {
        let tables = self.teams.read().await;
        Ok(tables
            .members
            .get(&member_id)
            .filter(|m| m.team_id == team_id)
            .cloned())
    }

    async fn list_members(&self, team_id: Uuid) -> AppResult<Vec<MemberSummary>> {
        let tables = self.teams.read().await;
        let mut members: Vec<MemberSummary> = tables
            .members
            .values()
            .filter(|m| m.team_id == team_id)
            .filter_map(|m| {
                self.user_contact(m.user_id)
                    .map(|(email, full_name)| MemberSummary {
                        id: m.id,
                        user_id: m.user_id,
                        email,
                        full_name,
                        role: m.base_role,
                        is_active: m.is_active,
                        joined_at: m.joined_at,
                        grants: tables.grants_of(m.id),
                    })
            })
            .collect();
        members.sort_by_key(|m| m.joined_at);
        Ok(members)
    }

    async fn remove_member(&self, member_id: Uuid) -> AppResult<bool> {
        let mut tables = self.teams.write().await;
        let removed = tables.members.remove(&member_id).is_some();
        if removed {
            tables.grants.retain(|_, g| g.team_member_id != member_id);
        }
        Ok(removed)
    }

    async fn update_member_role(
        &self,
        member_id: Uuid,
        role: TeamBaseRole,
    ) -> AppResult<Option<TeamMember>> {
        let mut tables = self.teams.write().await;
        Ok(tables
            .members
            .get_mut(&member_id)
            .filter(|m| m.base_role != TeamBaseRole::Owner)
            .map(|m| {
                m.base_role = role;
                m.clone()
            }))
    }

    async fn transfer_ownership(
        &self,
        team_id: Uuid,
        current_owner: Uuid,
        new_owner: Uuid,
    ) -> AppResult<Team> {
        let mut tables = self.teams.write().await;

        let owner_id = tables
            .teams
            .get(&team_id)
            .map(|t| t.owner_id)
            .ok_or_else(|| AppError::not_found(format!("Team {team_id} not found")))?;
        if owner_id != current_owner {
            return Err(AppError::authorization(
                "Only the team owner can transfer ownership",
            ));
        }
        if new_owner == current_owner {
            return Err(AppError::validation("User already owns this team"));
        }
        let target_id = tables
            .member_by_user(team_id, new_owner)
            .filter(|m| m.is_active)
            .map(|m| m.id)
            .ok_or_else(|| AppError::validation("New owner must be an active member of the team"))?;

        for member in tables.members.values_mut() {
            if member.team_id != team_id {
                continue;
            }
            if member.id == target_id {
                member.base_role = TeamBaseRole::Owner;
            } else if member.base_role == TeamBaseRole::Owner {
                member.base_role = TeamBaseRole::Manager;
            }
        }

        let team = tables
            .teams
            .get_mut(&team_id)
            .ok_or_else(|| AppError::not_found(format!("Team {team_id} not found")))?;
        team.owner_id = new_owner;
        Ok(team.clone())
    }

    async fn upsert_grant(
        &self,
        member_id: Uuid,
        scope: &str,
        grant_type: GrantType,
    ) -> AppResult<TeamRoleGrant> {
        let mut tables = self.teams.write().await;
        if let Some(existing) = tables
            .grants
            .values_mut()
            .find(|g| g.team_member_id == member_id && g.scope == scope)
        {
            existing.grant_type = grant_type;
            existing.created_at = Utc::now();
            return Ok(existing.clone());
        }
        let grant = TeamRoleGrant::new(member_id, scope, grant_type);
        tables.grants.insert(grant.id, grant.clone());
        Ok(grant)
    }

    async fn delete_grant(&self, member_id: Uuid, grant_id: Uuid) -> AppResult<bool> {
        let mut tables = self.teams.write().await;
        let owned = tables
            .grants
            .get(&grant_id)
            .is_some_and(|g| g.team_member_id == member_id);
        if owned {
            tables.grants.remove(&grant_id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl InviteRepository for MemoryStore {
    async fn create(&self, data: CreateInvite) -> AppResult<TeamInvite> {
        let mut tables = self.teams.write().await;
        let duplicate = tables.invites.values().any(|i| {
            i.team_id == data.team_id
                && i.status == InviteStatus::Pending
                && i.email.eq_ignore_ascii_case(&data.email)
        });
        if duplicate {
            return Err(AppError::conflict(format!(
                "An invite is already pending for '{}'",
                data.email
            )));
        }
        let invite = data.into_invite();
        tables.invites.insert(invite.id, invite.clone());
        Ok(invite)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TeamInvite>> {
        Ok(self.teams.read().await.invites.get(&id).cloned())
    }

    async fn find_pending(&self, team_id: Uuid, email: &str) -> AppResult<Option<TeamInvite>> {
        let tables = self.teams.read().await;
        Ok(tables
            .invites
            .values()
            .find(|i| {
                i.team_id == team_id && i.status == InviteStatus::Pending && i.is_addressed_to(email)
            })
            .cloned())
    }

    async fn list_open_for_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<PendingInvite>> {
        let tables = self.teams.read().await;
        let mut invites: Vec<PendingInvite> = tables
            .invites
            .values()
            .filter(|i| i.is_addressed_to(email) && i.is_open(now))
            .filter_map(|i| {
                tables.teams.get(&i.team_id).map(|t| PendingInvite {
                    invite: i.clone(),
                    team_name: t.name.clone(),
                })
            })
            .collect();
        invites.sort_by(|a, b| b.invite.created_at.cmp(&a.invite.created_at));
        Ok(invites)
    }

    async fn list_for_team(&self, team_id: Uuid) -> AppResult<Vec<TeamInvite>> {
        let tables = self.teams.read().await;
        let mut invites: Vec<TeamInvite> = tables
            .invites
            .values()
            .filter(|i| i.team_id == team_id)
            .cloned()
            .collect();
        invites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invites)
    }

    async fn close(
        &self,
        id: Uuid,
        status: InviteStatus,
        responded_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<TeamInvite>> {
        let mut tables = self.teams.write().await;
        Ok(tables
            .invites
            .get_mut(&id)
            .filter(|i| i.status == InviteStatus::Pending)
            .map(|i| {
                i.status = status;
                i.responded_at = responded_at;
                i.clone()
            }))
    }

    async fn accept(&self, id: Uuid, user_id: Uuid) -> AppResult<TeamMember> {
        let mut tables = self.teams.write().await;

        let invite = tables
            .invites
            .get_mut(&id)
            .filter(|i| i.status == InviteStatus::Pending)
            .ok_or_else(|| AppError::validation("Invite is no longer pending"))?;
        invite.status = InviteStatus::Accepted;
        invite.responded_at = Some(Utc::now());
        let team_id = invite.team_id;

        let existing = tables.member_by_user(team_id, user_id).map(|m| m.id);
        let member = match existing.and_then(|member_id| tables.members.get_mut(&member_id)) {
            Some(member) => {
                member.is_active = true;
                member.clone()
            }
            None => {
                let member = TeamMember::new(team_id, user_id, TeamBaseRole::Contributor);
                tables.members.insert(member.id, member.clone());
                member
            }
        };
        Ok(member)
    }
}
