//! Team document handlers: list, multipart upload, download, delete.
//!
//! Every route requires `X-Team-Id`.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use teamboard_core::error::{AppError, ErrorKind};
use teamboard_entity::document::DocumentSummary;
use teamboard_entity::document::model::DEFAULT_CONTENT_TYPE;
use teamboard_service::document::UploadDocument;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, TeamScope};
use crate::state::AppState;

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    scope: TeamScope,
) -> Result<Json<ApiResponse<Vec<DocumentSummary>>>, ApiError> {
    let team_id = scope.required()?;
    let documents = state.document_service.list(&auth, team_id).await?;
    Ok(Json(ApiResponse::ok(documents)))
}

/// POST /api/documents (multipart: `file`, optional `title`)
pub async fn upload_document(
    State(state): State<AppState>,
    auth: AuthUser,
    scope: TeamScope,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<DocumentSummary>>), ApiError> {
    let team_id = scope.required()?;

    let mut title: Option<String> = None;
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => {
                let text = field
                    .text()
                    .await
                    .map_err(multipart_error)?;
                title = Some(text);
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(multipart_error)?;
                file = Some((file_name, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::validation("Multipart field 'file' is required"))?;

    let document = state
        .document_service
        .upload(
            &auth,
            team_id,
            UploadDocument {
                file_name,
                title,
                content_type,
                data,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document))))
}

/// A body cut off by the request size limit keeps its 413; anything else
/// is a malformed upload.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(ErrorKind::PayloadTooLarge, err.body_text())
    } else {
        AppError::validation(format!("Malformed multipart body: {}", err.body_text()))
    }
}

/// GET /api/documents/{id}/download
pub async fn download_document(
    State(state): State<AppState>,
    auth: AuthUser,
    scope: TeamScope,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let team_id = scope.required()?;
    let document = state.document_service.download(&auth, team_id, id).await?;

    let content_type = HeaderValue::from_str(&document.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                attachment_disposition(&document.file_name),
            ),
        ],
        document.data,
    )
        .into_response())
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    scope: TeamScope,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let team_id = scope.required()?;
    state.document_service.delete(&auth, team_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `attachment; filename="..."` with characters that cannot appear in a
/// quoted header parameter replaced.
fn attachment_disposition(file_name: &str) -> HeaderValue {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    HeaderValue::from_str(&format!("attachment; filename=\"{safe}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
