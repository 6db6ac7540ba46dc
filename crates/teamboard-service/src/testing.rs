//! Fixtures for service tests, backed by the in-memory store.

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use teamboard_auth::team::TeamAuthorizer;
use teamboard_core::config::AuditConfig;
use teamboard_database::Repositories;
use teamboard_entity::team::{CreateInvite, GrantType, Team, TeamMember};
use teamboard_entity::user::CreateUser;

use crate::audit::AuditService;
use crate::context::RequestContext;
use crate::team::TeamService;

pub(crate) struct Fixture {
    pub repos: Repositories,
    pub authorizer: TeamAuthorizer,
    pub audit: AuditService,
}

impl Fixture {
    pub fn new() -> Self {
        let repos = Repositories::memory();
        let authorizer = TeamAuthorizer::new(Arc::clone(&repos.teams));
        let audit = AuditService::new(
            Arc::clone(&repos.audit),
            authorizer.clone(),
            AuditConfig::default(),
        );
        Self {
            repos,
            authorizer,
            audit,
        }
    }

    pub fn teams(&self) -> TeamService {
        TeamService::new(
            Arc::clone(&self.repos.teams),
            self.authorizer.clone(),
            self.audit.clone(),
        )
    }

    pub async fn user(&self, email: &str) -> RequestContext {
        let user = self
            .repos
            .users
            .create(CreateUser {
                email: email.to_string(),
                password_hash: "unused".to_string(),
                full_name: email.to_string(),
            })
            .await
            .unwrap();
        RequestContext::new(user.id, user.email)
    }

    pub async fn team(&self, owner: &RequestContext) -> Team {
        self.teams().create(owner, "Core").await.unwrap()
    }

    /// Adds `user` to the team as a Contributor.
    pub async fn join(&self, team: &Team, user: &RequestContext) -> TeamMember {
        let invite = self
            .repos
            .invites
            .create(CreateInvite {
                team_id: team.id,
                email: user.email.clone(),
                invited_by_user_id: team.owner_id,
                ttl: Duration::days(1),
            })
            .await
            .unwrap();
        self.repos.invites.accept(invite.id, user.user_id).await.unwrap()
    }

    pub async fn allow(&self, member: &TeamMember, scope: &str) {
        self.repos
            .teams
            .upsert_grant(member.id, scope, GrantType::Allow)
            .await
            .unwrap();
    }

    pub async fn member_of(&self, team: &Team, user: &RequestContext) -> Uuid {
        self.repos
            .teams
            .find_membership(team.id, user.user_id)
            .await
            .unwrap()
            .unwrap()
            .member
            .id
    }
}
