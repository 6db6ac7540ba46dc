use async_trait::async_trait;
use uuid::Uuid;

use teamboard_core::result::AppResult;
use teamboard_entity::audit::{AuditLogEntry, AuditLogView};
use teamboard_entity::document::{Document, DocumentSummary};

use super::MemoryStore;
use crate::repositories::{AuditRepository, DocumentRepository};

#[async_trait]
impl DocumentRepository for MemoryStore {
    async fn insert(&self, document: Document) -> AppResult<DocumentSummary> {
        let summary = document.summary();
        self.documents.insert(document.id, document);
        Ok(summary)
    }

    async fn list(&self, team_id: Uuid) -> AppResult<Vec<DocumentSummary>> {
        let mut documents: Vec<DocumentSummary> = self
            .documents
            .iter()
            .filter(|d| d.team_id == team_id)
            .map(|d| d.summary())
            .collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }

    async fn find(&self, team_id: Uuid, id: Uuid) -> AppResult<Option<Document>> {
        Ok(self
            .documents
            .get(&id)
            .filter(|d| d.team_id == team_id)
            .map(|d| d.clone()))
    }

    async fn find_summary(&self, team_id: Uuid, id: Uuid) -> AppResult<Option<DocumentSummary>> {
        Ok(self
            .documents
            .get(&id)
            .filter(|d| d.team_id == team_id)
            .map(|d| d.summary()))
    }

    async fn delete(&self, team_id: Uuid, id: Uuid) -> AppResult<bool> {
        Ok(self
            .documents
            .remove_if(&id, |_, d| d.team_id == team_id)
            .is_some())
    }
}

#[async_trait]
impl AuditRepository for MemoryStore {
    async fn insert(&self, entry: AuditLogEntry) -> AppResult<()> {
        self.audit.write().await.push(entry);
        Ok(())
    }

    async fn list_recent(&self, team_id: Uuid, limit: u32) -> AppResult<Vec<AuditLogView>> {
        let log = self.audit.read().await;
        Ok(log
            .iter()
            .rev()
            .filter(|e| e.team_id == team_id)
            .take(limit as usize)
            .map(|e| AuditLogView {
                id: e.id,
                user_id: e.user_id,
                user_email: self.user_contact(e.user_id).map(|(email, _)| email),
                action: e.action,
                entity_id: e.entity_id.clone(),
                details: e.details.clone(),
                created_at: e.created_at,
            })
            .collect())
    }
}
