//! Deck, card and sharing endpoints (`/rest/v1`)

use fd_core::{
    ApiCard, ApiDeck, ApiSharedDeck, CardFormDraft, DeckPatch, NewDeck, UiCard,
    map_api_card_to_ui_card,
};
use reqwest::Method;
use uuid::Uuid;

use crate::{client::BackendClient, error::ClientError};

impl BackendClient {
    /// Decks owned by the signed-in user
    pub async fn list_decks(&self) -> Result<Vec<ApiDeck>, ClientError> {
        let request = self.authed(Method::GET, "/rest/v1/decks")?;
        self.send(request).await
    }

    /// One deck of the signed-in user
    pub async fn get_deck(&self, deck_id: Uuid) -> Result<ApiDeck, ClientError> {
        let request = self.authed(Method::GET, &format!("/rest/v1/decks/{deck_id}"))?;
        self.send(request).await
    }

    /// Create a deck; the title must not be blank
    pub async fn create_deck(&self, deck: &NewDeck) -> Result<ApiDeck, ClientError> {
        if deck.title.trim().is_empty() {
            return Err(ClientError::Validation(
                "Deck title cannot be empty".to_string(),
            ));
        }

        let request = self.authed(Method::POST, "/rest/v1/decks")?.json(deck);
        let deck: ApiDeck = self.send(request).await?;

        tracing::info!(deck_id = %deck.id, "deck created");
        Ok(deck)
    }

    /// Apply a partial update to a deck
    pub async fn update_deck(
        &self,
        deck_id: Uuid,
        patch: &DeckPatch,
    ) -> Result<ApiDeck, ClientError> {
        let request = self
            .authed(Method::PATCH, &format!("/rest/v1/decks/{deck_id}"))?
            .json(patch);
        self.send(request).await
    }

    /// Delete a deck and its cards
    pub async fn delete_deck(&self, deck_id: Uuid) -> Result<(), ClientError> {
        let request = self.authed(Method::DELETE, &format!("/rest/v1/decks/{deck_id}"))?;
        self.send_empty(request).await?;

        tracing::info!(%deck_id, "deck deleted");
        Ok(())
    }

    /// Cards of a deck, already mapped to the UI shape
    pub async fn list_cards(&self, deck_id: Uuid) -> Result<Vec<UiCard>, ClientError> {
        let request = self.authed(Method::GET, &format!("/rest/v1/decks/{deck_id}/cards"))?;
        let cards: Vec<ApiCard> = self.send(request).await?;

        Ok(cards.into_iter().map(map_api_card_to_ui_card).collect())
    }

    /// Validate a draft and add it to a deck
    pub async fn create_card(
        &self,
        deck_id: Uuid,
        draft: CardFormDraft,
    ) -> Result<UiCard, ClientError> {
        draft.validate()?;

        let request = self
            .authed(Method::POST, &format!("/rest/v1/decks/{deck_id}/cards"))?
            .json(&draft.into_new_card());
        let card: ApiCard = self.send(request).await?;

        Ok(map_api_card_to_ui_card(card))
    }

    /// Validate a draft and overwrite an existing card with it
    pub async fn update_card(
        &self,
        card_id: Uuid,
        draft: CardFormDraft,
    ) -> Result<UiCard, ClientError> {
        draft.validate()?;

        let request = self
            .authed(Method::PATCH, &format!("/rest/v1/cards/{card_id}"))?
            .json(&draft.into_new_card());
        let card: ApiCard = self.send(request).await?;

        Ok(map_api_card_to_ui_card(card))
    }

    /// Delete a single card
    pub async fn delete_card(&self, card_id: Uuid) -> Result<(), ClientError> {
        let request = self.authed(Method::DELETE, &format!("/rest/v1/cards/{card_id}"))?;
        self.send_empty(request).await
    }

    /// Publish a deck; the returned deck carries its share id
    pub async fn publish_deck(&self, deck_id: Uuid) -> Result<ApiDeck, ClientError> {
        let request = self.authed(Method::POST, &format!("/rest/v1/decks/{deck_id}/publish"))?;
        let deck: ApiDeck = self.send(request).await?;

        tracing::info!(%deck_id, share_id = ?deck.share_id, "deck published");
        Ok(deck)
    }

    /// Stop sharing a deck; the returned deck has no share id
    pub async fn unpublish_deck(&self, deck_id: Uuid) -> Result<ApiDeck, ClientError> {
        let request = self.authed(
            Method::POST,
            &format!("/rest/v1/decks/{deck_id}/unpublish"),
        )?;
        let deck: ApiDeck = self.send(request).await?;

        tracing::info!(%deck_id, "deck unpublished");
        Ok(deck)
    }

    /// Public view of a published deck; no session needed
    pub async fn get_shared_deck(&self, share_id: &str) -> Result<ApiSharedDeck, ClientError> {
        if !is_valid_share_id(share_id) {
            return Err(ClientError::Validation(format!(
                "Invalid share id: '{share_id}'"
            )));
        }

        let request = self.request(Method::GET, &format!("/rest/v1/shared-decks/{share_id}"));
        self.send(request).await
    }
}

/// Share ids are opaque URL-safe tokens
pub(crate) fn is_valid_share_id(share_id: &str) -> bool {
    !share_id.is_empty()
        && share_id.len() <= 64
        && share_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
