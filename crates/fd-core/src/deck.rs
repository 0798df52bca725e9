use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    card::{ApiCard, UiCard},
    error::CoreError,
    social::Profile,
};

/// Deck record as stored by the hosted backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDeck {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the deck is published
    #[serde(default)]
    pub is_public: bool,
    /// Public share identifier, set while the deck is published
    #[serde(default)]
    pub share_id: Option<String>,
    #[serde(default)]
    pub card_count: Option<i64>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDeck {
    pub title: String,
    pub description: Option<String>,
}

/// Partial update of a deck; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Everything the backend returns for a shared deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSharedDeck {
    pub deck: ApiDeck,
    pub owner: Profile,
    #[serde(default)]
    pub cards: Vec<ApiCard>,
}

/// Denormalized view of a published deck, as shown on its share page.
///
/// Only built from backend data through [`SharedDeckData::from_api`] and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedDeckData {
    deck_id: Uuid,
    share_id: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    owner_id: Uuid,
    owner_name: String,
    card_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_at: Option<DateTime<Utc>>,
    cards: Vec<UiCard>,
}

impl SharedDeckData {
    /// Build the share view of a deck.
    ///
    /// Cards are ordered by position; cards sharing a position keep the
    /// backend order. Fails with [`CoreError::NotShared`] if the deck is not
    /// public or has no share id.
    pub fn from_api(shared: ApiSharedDeck) -> Result<Self, CoreError> {
        let ApiSharedDeck { deck, owner, cards } = shared;

        let share_id = match deck.share_id {
            Some(share_id) if deck.is_public && !share_id.is_empty() => share_id,
            _ => return Err(CoreError::NotShared),
        };

        let mut cards: Vec<UiCard> = cards.into_iter().map(UiCard::from).collect();
        cards.sort_by_key(|card| card.position);

        Ok(Self {
            deck_id: deck.id,
            share_id,
            title: deck.title,
            description: deck.description,
            owner_id: owner.id,
            owner_name: owner.display_label().to_string(),
            card_count: cards.len(),
            published_at: deck.published_at,
            cards,
        })
    }

    /// Id of the shared deck
    pub fn deck_id(&self) -> Uuid {
        self.deck_id
    }

    /// Public share identifier
    pub fn share_id(&self) -> &str {
        &self.share_id
    }

    /// Deck title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Deck description, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Id of the deck owner
    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    /// Display name of the owner, falling back to the username
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Number of cards on the share page
    pub fn card_count(&self) -> usize {
        self.card_count
    }

    /// When the deck was published
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    /// Cards in study order
    pub fn cards(&self) -> &[UiCard] {
        &self.cards
    }
}

/// What the "unpublish deck" confirmation dialog needs to know about a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpublishDeckDialogDeck {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_count: Option<i64>,
}

impl From<&ApiDeck> for UnpublishDeckDialogDeck {
    fn from(deck: &ApiDeck) -> Self {
        Self {
            id: deck.id,
            title: deck.title.clone(),
            share_id: deck.share_id.clone(),
            card_count: deck.card_count,
        }
    }
}

/// Result of publishing a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedDeck {
    pub deck_id: Uuid,
    pub share_id: String,
    pub share_url: String,
}

impl PublishedDeck {
    /// Share link of a published deck under `site_url`.
    ///
    /// Fails with [`CoreError::NotShared`] if the backend did not hand out a
    /// share id.
    pub fn from_deck(deck: &ApiDeck, site_url: &str) -> Result<Self, CoreError> {
        let share_id = deck
            .share_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(CoreError::NotShared)?;

        Ok(Self {
            deck_id: deck.id,
            share_url: format!("{}/shared/{}", site_url.trim_end_matches('/'), share_id),
            share_id,
        })
    }
}
