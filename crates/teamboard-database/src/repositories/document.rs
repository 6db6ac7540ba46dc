//! Team document repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use teamboard_core::result::AppResult;
use teamboard_entity::document::{Document, DocumentSummary};

use super::db_error;

/// Storage for team documents.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Store a document and return its metadata.
    async fn insert(&self, document: Document) -> AppResult<DocumentSummary>;

    /// Metadata of a team's documents, newest first.
    async fn list(&self, team_id: Uuid) -> AppResult<Vec<DocumentSummary>>;

    /// A document with its payload.
    async fn find(&self, team_id: Uuid, id: Uuid) -> AppResult<Option<Document>>;

    /// Metadata of one document.
    async fn find_summary(&self, team_id: Uuid, id: Uuid) -> AppResult<Option<DocumentSummary>>;

    /// Delete a document.
    async fn delete(&self, team_id: Uuid, id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL document repository.
#[derive(Debug, Clone)]
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SUMMARY_COLUMNS: &str =
    "id, team_id, owner_user_id, title, file_name, content_type, size, created_at";

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn insert(&self, document: Document) -> AppResult<DocumentSummary> {
        sqlx::query_as::<_, DocumentSummary>(&format!(
            r#"INSERT INTO documents
                (id, team_id, owner_user_id, title, file_name, content_type, data, size, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING {SUMMARY_COLUMNS}"#
        ))
        .bind(document.id)
        .bind(document.team_id)
        .bind(document.owner_user_id)
        .bind(&document.title)
        .bind(&document.file_name)
        .bind(&document.content_type)
        .bind(&document.data)
        .bind(document.size)
        .bind(document.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to store document"))
    }

    async fn list(&self, team_id: Uuid) -> AppResult<Vec<DocumentSummary>> {
        sqlx::query_as::<_, DocumentSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM documents WHERE team_id = $1 ORDER BY created_at DESC"
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list documents"))
    }

    async fn find(&self, team_id: Uuid, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE team_id = $1 AND id = $2")
            .bind(team_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to load document"))
    }

    async fn find_summary(&self, team_id: Uuid, id: Uuid) -> AppResult<Option<DocumentSummary>> {
        sqlx::query_as::<_, DocumentSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM documents WHERE team_id = $1 AND id = $2"
        ))
        .bind(team_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find document"))
    }

    async fn delete(&self, team_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE team_id = $1 AND id = $2")
            .bind(team_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete document"))?;
        Ok(result.rows_affected() > 0)
    }
}
