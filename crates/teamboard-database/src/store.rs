//! Repository bundle that dispatches to the configured provider.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use teamboard_core::config::{DatabaseConfig, StoreProvider};
use teamboard_core::result::AppResult;

use crate::connection;
use crate::memory::MemoryStore;
use crate::repositories::{
    AuditRepository, CardRepository, ColumnRepository, DocumentRepository, InviteRepository,
    PgAuditRepository, PgCardRepository, PgColumnRepository, PgDocumentRepository,
    PgInviteRepository, PgTaskRepository, PgTeamRepository, PgUserRepository, TaskRepository,
    TeamRepository, UserRepository,
};

/// One implementation of every repository, shared by the services.
///
/// The provider is selected at construction time based on configuration.
#[derive(Clone)]
pub struct Repositories {
    /// Accounts.
    pub users: Arc<dyn UserRepository>,
    /// Teams, members, grants.
    pub teams: Arc<dyn TeamRepository>,
    /// Team invites.
    pub invites: Arc<dyn InviteRepository>,
    /// Board tasks.
    pub tasks: Arc<dyn TaskRepository>,
    /// Board columns.
    pub columns: Arc<dyn ColumnRepository>,
    /// Dashboard cards.
    pub cards: Arc<dyn CardRepository>,
    /// Team documents.
    pub documents: Arc<dyn DocumentRepository>,
    /// Team audit log.
    pub audit: Arc<dyn AuditRepository>,
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory,
}

impl Repositories {
    /// Build the bundle for the configured provider, connecting to and
    /// migrating PostgreSQL when selected.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                let pool = connection::open_pool(config).await?;
                Ok(Self::postgres(pool))
            }
            StoreProvider::Memory => {
                info!("Using in-memory store; data is not persisted");
                Ok(Self::memory())
            }
        }
    }

    /// PostgreSQL repositories over a shared pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            teams: Arc::new(PgTeamRepository::new(pool.clone())),
            invites: Arc::new(PgInviteRepository::new(pool.clone())),
            tasks: Arc::new(PgTaskRepository::new(pool.clone())),
            columns: Arc::new(PgColumnRepository::new(pool.clone())),
            cards: Arc::new(PgCardRepository::new(pool.clone())),
            documents: Arc::new(PgDocumentRepository::new(pool.clone())),
            audit: Arc::new(PgAuditRepository::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    /// A fresh, empty in-memory store.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            teams: store.clone(),
            invites: store.clone(),
            tasks: store.clone(),
            columns: store.clone(),
            cards: store.clone(),
            documents: store.clone(),
            audit: store,
            backend: Backend::Memory,
        }
    }

    /// Name of the active provider.
    pub fn provider(&self) -> StoreProvider {
        match self.backend {
            Backend::Postgres(_) => StoreProvider::Postgres,
            Backend::Memory => StoreProvider::Memory,
        }
    }

    /// Check that the backing store answers.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.backend {
            Backend::Postgres(pool) => connection::ping(pool).await,
            Backend::Memory => Ok(true),
        }
    }

    /// Release backend resources on shutdown.
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
            info!("Database pool closed");
        }
    }
}
