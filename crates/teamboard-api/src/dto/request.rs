//! Request DTOs with validation.
//!
//! The rules here reject obviously malformed bodies early. Services still
//! trim and re-check every field they store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use teamboard_entity::task::TaskPriority;
use teamboard_entity::team::GrantType;
use teamboard_service::auth::{LoginRequest as SvcLogin, RegisterRequest as SvcRegister};
use teamboard_service::card::CardRequest as SvcCard;
use teamboard_service::column::UpdateColumnRequest as SvcUpdateColumn;
use teamboard_service::task::{CreateTaskRequest as SvcCreateTask, UpdateTaskRequest as SvcUpdateTask};
use teamboard_service::user::UpdateProfileRequest as SvcUpdateProfile;

// ── Auth ─────────────────────────────────────────────────────────

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Account email.
    #[validate(
        length(min = 1, max = 256, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Full name must be 1-200 characters"))]
    pub full_name: String,
}

impl From<RegisterRequest> for SvcRegister {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<LoginRequest> for SvcLogin {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

// ── Users ────────────────────────────────────────────────────────

/// Profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name.
    #[validate(length(max = 200, message = "Full name must be at most 200 characters"))]
    pub full_name: Option<String>,
    /// New avatar URL; an empty string clears it.
    #[validate(length(max = 2048))]
    pub avatar_url: Option<String>,
}

impl From<UpdateProfileRequest> for SvcUpdateProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            full_name: req.full_name,
            avatar_url: req.avatar_url,
        }
    }
}

// ── Teams ────────────────────────────────────────────────────────

/// Create or rename a team.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TeamNameRequest {
    /// Team name.
    #[validate(length(min = 1, max = 200, message = "Team name must be 1-200 characters"))]
    pub name: String,
}

/// Change a member's base role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    /// `Manager` or `Contributor`.
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

/// Hand the team to another member.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransferOwnershipRequest {
    /// User id of the new owner; must be an active member.
    pub new_owner_id: Uuid,
}

/// Create or replace a member's grant for one scope.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GrantRequest {
    /// Scope string such as `documents:write`.
    #[validate(length(min = 1, max = 200, message = "Scope must be 1-200 characters"))]
    pub scope: String,
    /// `Allow` or `Deny`.
    pub grant_type: GrantType,
}

/// `?limit=` of the audit log listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditQuery {
    /// Page size; clamped by the service.
    pub limit: Option<u32>,
}

// ── Invites ──────────────────────────────────────────────────────

/// Invite an email into a team.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InviteRequest {
    /// Invitee email.
    #[validate(
        length(min = 1, max = 256, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,
}

// ── Tasks ────────────────────────────────────────────────────────

/// New task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub column_id: Option<String>,
}

impl From<CreateTaskRequest> for SvcCreateTask {
    fn from(req: CreateTaskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            priority: req.priority,
            due_date: req.due_date,
            column_id: req.column_id,
        }
    }
}

/// Partial task update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub column_id: Option<String>,
}

impl From<UpdateTaskRequest> for SvcUpdateTask {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            completed: req.completed,
            priority: req.priority,
            due_date: req.due_date,
            column_id: req.column_id,
        }
    }
}

/// Move a task to another column.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    #[validate(length(min = 1, message = "Column is required"))]
    pub column_id: String,
}

// ── Columns ──────────────────────────────────────────────────────

/// New column.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateColumnRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    pub color: Option<String>,
}

/// Partial column update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateColumnRequest {
    #[validate(length(max = 100, message = "Title must be at most 100 characters"))]
    pub title: Option<String>,
    #[validate(range(min = 1))]
    pub order: Option<i32>,
    pub color: Option<String>,
}

impl From<UpdateColumnRequest> for SvcUpdateColumn {
    fn from(req: UpdateColumnRequest) -> Self {
        Self {
            title: req.title,
            order: req.order,
            color: req.color,
        }
    }
}

/// New column order, first id first.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumnsRequest {
    pub column_ids: Vec<String>,
}

// ── Cards ────────────────────────────────────────────────────────

/// Card contents for create and replace.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CardRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "Value is required"))]
    pub value: String,
    #[validate(length(min = 1, max = 100, message = "Icon is required"))]
    pub icon: String,
    pub color: Option<String>,
}

impl From<CardRequest> for SvcCard {
    fn from(req: CardRequest) -> Self {
        Self {
            title: req.title,
            value: req.value,
            icon: req.icon,
            color: req.color,
        }
    }
}
