use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_entity::user::{CreateUser, UpdateUserProfile, User};

use super::MemoryStore;
use crate::repositories::UserRepository;

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, data: CreateUser) -> AppResult<User> {
        match self.emails.entry(data.email.to_lowercase()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                data.email
            ))),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let user = User {
                    id: Uuid::new_v4(),
                    email: data.email,
                    password_hash: data.password_hash,
                    full_name: data.full_name,
                    custom_avatar_url: None,
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let id = self.emails.get(&email.trim().to_lowercase()).map(|id| *id);
        Ok(id.and_then(|id| self.users.get(&id).map(|u| u.clone())))
    }

    async fn update_profile(&self, id: Uuid, data: UpdateUserProfile) -> AppResult<User> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        if let Some(full_name) = data.full_name {
            user.full_name = full_name;
        }
        if let Some(avatar) = data.custom_avatar_url {
            user.custom_avatar_url = avatar;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}
