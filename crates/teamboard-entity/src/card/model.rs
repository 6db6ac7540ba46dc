//! Dashboard summary card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A summary tile on a user's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique card identifier.
    pub id: Uuid,
    /// Owning user.
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    /// Heading.
    pub title: String,
    /// Displayed value.
    pub value: String,
    /// Icon name.
    pub icon: String,
    /// Optional accent color.
    pub color: Option<String>,
    /// When the card was created.
    pub created_at: DateTime<Utc>,
}

/// Card fields supplied on create and update.
#[derive(Debug, Clone)]
pub struct CardInput {
    /// Heading.
    pub title: String,
    /// Displayed value.
    pub value: String,
    /// Icon name.
    pub icon: String,
    /// Accent color.
    pub color: Option<String>,
}

impl Card {
    /// Build a new card for a user.
    pub fn new(user_id: Uuid, input: CardInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: input.title,
            value: input.value,
            icon: input.icon,
            color: input.color,
            created_at: Utc::now(),
        }
    }

    /// Replace the editable fields.
    pub fn replace(&mut self, input: CardInput) {
        self.title = input.title;
        self.value = input.value;
        self.icon = input.icon;
        self.color = input.color;
    }
}
