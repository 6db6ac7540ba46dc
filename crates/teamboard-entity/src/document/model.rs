//! Team document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Content type recorded when the upload carries none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file uploaded to a team, stored inline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Owning team.
    pub team_id: Uuid,
    /// Uploader.
    pub owner_user_id: Uuid,
    /// Display title.
    pub title: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// Raw bytes.
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Size in bytes.
    pub size: i64,
    /// When the document was uploaded.
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Metadata view without the payload.
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            team_id: self.team_id,
            owner_user_id: self.owner_user_id,
            title: self.title.clone(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            size: self.size,
            created_at: self.created_at,
        }
    }
}

/// Document metadata as listed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    /// Document identifier.
    pub id: Uuid,
    /// Owning team.
    pub team_id: Uuid,
    /// Uploader.
    pub owner_user_id: Uuid,
    /// Display title.
    pub title: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// Size in bytes.
    pub size: i64,
    /// When the document was uploaded.
    pub created_at: DateTime<Utc>,
}

/// Data required to store a document.
#[derive(Debug, Clone)]
pub struct CreateDocument {
    /// Owning team.
    pub team_id: Uuid,
    /// Uploader.
    pub owner_user_id: Uuid,
    /// Title.
    pub title: String,
    /// File name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// Payload.
    pub data: Vec<u8>,
}

impl CreateDocument {
    /// Materialize the document row.
    pub fn into_document(self) -> Document {
        Document {
            id: Uuid::new_v4(),
            team_id: self.team_id,
            owner_user_id: self.owner_user_id,
            title: self.title,
            file_name: self.file_name,
            content_type: self.content_type,
            size: self.data.len() as i64,
            data: self.data,
            created_at: Utc::now(),
        }
    }
}
