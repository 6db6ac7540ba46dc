//! Team document upload, listing, download, and deletion.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use teamboard_auth::team::{TeamAuthorizer, scopes};
use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_database::repositories::DocumentRepository;
use teamboard_entity::audit::{AuditAction, CreateAuditLogEntry};
use teamboard_entity::document::model::DEFAULT_CONTENT_TYPE;
use teamboard_entity::document::{CreateDocument, Document, DocumentSummary};

use crate::audit::AuditService;
use crate::context::RequestContext;
use crate::text;

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadDocument {
    /// Client-side file name.
    pub file_name: String,
    /// Optional display title; defaults to the file stem.
    pub title: Option<String>,
    /// Declared content type.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Vec<u8>,
}

/// Manages documents shared within a team.
#[derive(Clone)]
pub struct DocumentService {
    documents: Arc<dyn DocumentRepository>,
    authorizer: TeamAuthorizer,
    audit: AuditService,
    max_upload_bytes: usize,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        authorizer: TeamAuthorizer,
        audit: AuditService,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            documents,
            authorizer,
            audit,
            max_upload_bytes,
        }
    }

    /// Document metadata of a team, newest first. Members only.
    pub async fn list(&self, ctx: &RequestContext, team_id: Uuid) -> AppResult<Vec<DocumentSummary>> {
        self.authorizer.membership(team_id, ctx.user_id).await?;
        self.documents.list(team_id).await
    }

    /// Stores a file. Requires `documents:write`.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
        upload: UploadDocument,
    ) -> AppResult<DocumentSummary> {
        self.authorizer
            .authorize(team_id, ctx.user_id, scopes::DOCUMENTS_WRITE)
            .await?;

        if upload.data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if upload.data.len() > self.max_upload_bytes {
            return Err(AppError::validation(format!(
                "File exceeds the maximum upload size of {} bytes",
                self.max_upload_bytes
            )));
        }

        let file_name = base_name(&upload.file_name);
        let title = match text::non_blank(upload.title) {
            Some(title) => text::required("Title", &title, 200)?,
            None => stem(&file_name),
        };
        let content_type =
            text::non_blank(upload.content_type).unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let document = CreateDocument {
            team_id,
            owner_user_id: ctx.user_id,
            title,
            file_name,
            content_type,
            data: upload.data,
        }
        .into_document();
        let summary = self.documents.insert(document).await?;

        self.audit
            .record(
                CreateAuditLogEntry::new(team_id, ctx.user_id, AuditAction::DocumentUploaded)
                    .entity(summary.id)
                    .details(&summary.file_name),
            )
            .await;

        info!(team_id = %team_id, document_id = %summary.id, size = summary.size, "Document uploaded");

        Ok(summary)
    }

    /// A document with its contents. Members only.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        team_id: Uuid,
        document_id: Uuid,
    ) -> AppResult<Document> {
        self.authorizer.membership(team_id, ctx.user_id).await?;
        self.documents
            .find(team_id, document_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))
    }

    /// Deletes a document. Allowed for Owner/Manager, the uploader, and
    /// holders of `documents:delete`.
    pub async fn delete(&self, ctx: &RequestContext, team_id: Uuid, document_id: Uuid) -> AppResult<()> {
        let access = self.authorizer.membership(team_id, ctx.user_id).await?;
        let document = self
            .documents
            .find_summary(team_id, document_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        if document.owner_user_id != ctx.user_id {
            access.require(scopes::DOCUMENTS_DELETE)?;
        }

        if !self.documents.delete(team_id, document_id).await? {
            return Err(AppError::not_found("Document not found"));
        }

        self.audit
            .record(
                CreateAuditLogEntry::new(team_id, ctx.user_id, AuditAction::DocumentDeleted)
                    .entity(document_id)
                    .details(&document.file_name),
            )
            .await;

        info!(team_id = %team_id, document_id = %document_id, "Document deleted");

        Ok(())
    }
}

/// Last path component of a client-supplied name.
fn base_name(file_name: &str) -> String {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() {
        "document".to_string()
    } else {
        name.to_string()
    }
}

fn stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(file_name)
        .to_string()
}
