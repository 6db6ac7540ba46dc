//! Per-user dashboard cards.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;
use teamboard_database::repositories::CardRepository;
use teamboard_entity::card::{Card, CardInput};

use crate::context::RequestContext;
use crate::text;

/// Card fields as submitted for create and replace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    /// Heading.
    pub title: String,
    /// Displayed value.
    pub value: String,
    /// Icon name.
    pub icon: String,
    /// Optional accent color.
    pub color: Option<String>,
}

impl CardRequest {
    fn into_input(self) -> AppResult<CardInput> {
        Ok(CardInput {
            title: text::required("Title", &self.title, 200)?,
            value: text::required("Value", &self.value, 200)?,
            icon: text::required("Icon", &self.icon, 100)?,
            color: text::non_blank(self.color),
        })
    }
}

/// Manages the caller's dashboard cards.
#[derive(Clone)]
pub struct CardService {
    cards: Arc<dyn CardRepository>,
}

impl CardService {
    /// Creates a new card service.
    pub fn new(cards: Arc<dyn CardRepository>) -> Self {
        Self { cards }
    }

    /// The caller's cards.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Card>> {
        self.cards.list(ctx.user_id).await
    }

    /// One of the caller's cards.
    pub async fn get(&self, ctx: &RequestContext, card_id: Uuid) -> AppResult<Card> {
        self.cards
            .find(ctx.user_id, card_id)
            .await?
            .ok_or_else(|| AppError::not_found("Card not found"))
    }

    /// Adds a card.
    pub async fn create(&self, ctx: &RequestContext, req: CardRequest) -> AppResult<Card> {
        let card = Card::new(ctx.user_id, req.into_input()?);
        self.cards.insert(card).await
    }

    /// Replaces the fields of a card.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        card_id: Uuid,
        req: CardRequest,
    ) -> AppResult<Card> {
        let input = req.into_input()?;
        let mut card = self.get(ctx, card_id).await?;
        card.replace(input);
        self.cards.save(card).await
    }

    /// Deletes a card.
    pub async fn delete(&self, ctx: &RequestContext, card_id: Uuid) -> AppResult<()> {
        if self.cards.delete(ctx.user_id, card_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Card not found"))
        }
    }
}
