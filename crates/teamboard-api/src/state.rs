//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use teamboard_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, TeamAuthorizer};
use teamboard_core::config::AppConfig;
use teamboard_database::Repositories;
use teamboard_service::{
    AuditService, AuthService, CardService, ColumnService, DocumentService, InviteService,
    TaskService, TeamService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Repositories of the configured store provider
    pub repos: Repositories,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token validation
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and login
    pub auth_service: Arc<AuthService>,
    /// Profile of the caller
    pub user_service: Arc<UserService>,
    /// Teams, members, and grants
    pub team_service: Arc<TeamService>,
    /// Team invites
    pub invite_service: Arc<InviteService>,
    /// Board tasks
    pub task_service: Arc<TaskService>,
    /// Board columns
    pub column_service: Arc<ColumnService>,
    /// Dashboard cards
    pub card_service: Arc<CardService>,
    /// Team documents
    pub document_service: Arc<DocumentService>,
    /// Team audit log
    pub audit_service: Arc<AuditService>,
}

impl AppState {
    /// Wire every service on top of the given repositories.
    pub fn new(config: AppConfig, repos: Repositories) -> Self {
        // ── Auth ──
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::default());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let authorizer = TeamAuthorizer::new(Arc::clone(&repos.teams));

        // ── Services ──
        let audit = AuditService::new(
            Arc::clone(&repos.audit),
            authorizer.clone(),
            config.audit.clone(),
        );

        let auth_service = AuthService::new(
            Arc::clone(&repos.users),
            password_hasher,
            password_validator,
            jwt_encoder,
        );
        let user_service = UserService::new(Arc::clone(&repos.users));
        let team_service = TeamService::new(
            Arc::clone(&repos.teams),
            authorizer.clone(),
            audit.clone(),
        );
        let invite_service = InviteService::new(
            Arc::clone(&repos.invites),
            Arc::clone(&repos.teams),
            Arc::clone(&repos.users),
            authorizer.clone(),
            audit.clone(),
            config.invites.ttl_days,
        );
        let task_service = TaskService::new(
            Arc::clone(&repos.tasks),
            authorizer.clone(),
            audit.clone(),
        );
        let column_service = ColumnService::new(Arc::clone(&repos.columns), authorizer.clone());
        let card_service = CardService::new(Arc::clone(&repos.cards));
        let document_service = DocumentService::new(
            Arc::clone(&repos.documents),
            authorizer,
            audit.clone(),
            config.documents.max_upload_bytes,
        );

        Self {
            config: Arc::new(config),
            repos,
            jwt_decoder,
            auth_service: Arc::new(auth_service),
            user_service: Arc::new(user_service),
            team_service: Arc::new(team_service),
            invite_service: Arc::new(invite_service),
            task_service: Arc::new(task_service),
            column_service: Arc::new(column_service),
            card_service: Arc::new(card_service),
            document_service: Arc::new(document_service),
            audit_service: Arc::new(audit),
        }
    }
}
