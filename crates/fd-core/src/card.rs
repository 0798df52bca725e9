use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::CoreError,
    normalization::answers_match,
    validation::{validate_card_text, validate_media_url},
};

/// How a card is studied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    /// Flip the card to see the back
    #[default]
    Basic,
    /// Type the answer; checked against the back and the accepted answers
    TypeAnswer,
    /// Pick the back among the wrong answers
    MultipleChoice,
}

/// Card record as stored by the hosted backend (snake_case on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub card_type: CardType,
    #[serde(default)]
    pub front_image_url: Option<String>,
    #[serde(default)]
    pub back_image_url: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub accepted_answers: Option<Vec<String>>,
    #[serde(default)]
    pub wrong_answers: Option<Vec<String>>,
    /// Order of the card inside its deck
    #[serde(default)]
    pub position: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Card as the UI consumes it (camelCase on the wire, absent fields omitted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiCard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub front: String,
    pub back: String,
    pub card_type: CardType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_answers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrong_answers: Option<Vec<String>>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Project a backend card onto the UI card shape.
///
/// Field-by-field rename. Optional fields that were `null` or missing in the
/// backend payload stay `None` and are left out of the UI JSON.
pub fn map_api_card_to_ui_card(card: ApiCard) -> UiCard {
    UiCard {
        id: card.id,
        deck_id: card.deck_id,
        front: card.front,
        back: card.back,
        card_type: card.card_type,
        front_image_url: card.front_image_url,
        back_image_url: card.back_image_url,
        audio_url: card.audio_url,
        accepted_answers: card.accepted_answers,
        wrong_answers: card.wrong_answers,
        position: card.position,
        created_at: card.created_at,
        updated_at: card.updated_at,
    }
}

impl From<ApiCard> for UiCard {
    fn from(card: ApiCard) -> Self {
        map_api_card_to_ui_card(card)
    }
}

impl UiCard {
    /// Check a typed answer against the back of the card and its accepted answers
    pub fn accepts(&self, answer: &str) -> bool {
        answers_match(answer, &self.back)
            || self
                .accepted_answers
                .iter()
                .flatten()
                .any(|accepted| answers_match(answer, accepted))
    }
}

/// Editable draft of a card, as held by the card form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFormDraft {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub card_type: CardType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_answers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrong_answers: Option<Vec<String>>,
}

/// Card payload accepted by the backend on create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub front: String,
    pub back: String,
    pub card_type: CardType,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
    pub audio_url: Option<String>,
    pub accepted_answers: Option<Vec<String>>,
    pub wrong_answers: Option<Vec<String>>,
}

impl CardFormDraft {
    /// Blank draft for a new card
    pub fn new(card_type: CardType) -> Self {
        Self {
            card_type,
            ..Self::default()
        }
    }

    /// Draft pre-filled from an existing card, for editing
    pub fn from_card(card: &UiCard) -> Self {
        Self {
            front: card.front.clone(),
            back: card.back.clone(),
            card_type: card.card_type,
            front_image_url: card.front_image_url.clone(),
            back_image_url: card.back_image_url.clone(),
            audio_url: card.audio_url.clone(),
            accepted_answers: card.accepted_answers.clone(),
            wrong_answers: card.wrong_answers.clone(),
        }
    }

    /// Check the draft before it is submitted.
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_card_text("front", &self.front)?;
        validate_card_text("back", &self.back)?;

        let media = [
            ("Front image URL", &self.front_image_url),
            ("Back image URL", &self.back_image_url),
            ("Audio URL", &self.audio_url),
        ];
        for (field, url) in media {
            if let Some(url) = url {
                validate_media_url(field, url)?;
            }
        }

        match self.card_type {
            CardType::Basic => {}
            CardType::TypeAnswer if non_blank(&self.accepted_answers).is_none() => {
                return Err(CoreError::Validation(
                    "A type-answer card needs at least one accepted answer".to_string(),
                ));
            }
            CardType::MultipleChoice if non_blank(&self.wrong_answers).is_none() => {
                return Err(CoreError::Validation(
                    "A multiple-choice card needs at least one wrong answer".to_string(),
                ));
            }
            CardType::TypeAnswer | CardType::MultipleChoice => {}
        }

        Ok(())
    }

    /// Turn the draft into the backend payload, consuming it.
    ///
    /// Text is trimmed, blank media URLs become `None`, blank answers are
    /// dropped and an answer list left empty becomes `None`.
    pub fn into_new_card(self) -> NewCard {
        NewCard {
            front: self.front.trim().to_string(),
            back: self.back.trim().to_string(),
            card_type: self.card_type,
            front_image_url: non_blank_url(self.front_image_url),
            back_image_url: non_blank_url(self.back_image_url),
            audio_url: non_blank_url(self.audio_url),
            accepted_answers: non_blank(&self.accepted_answers),
            wrong_answers: non_blank(&self.wrong_answers),
        }
    }
}

fn non_blank_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

fn non_blank(answers: &Option<Vec<String>>) -> Option<Vec<String>> {
    let answers: Vec<String> = answers
        .iter()
        .flatten()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();

    (!answers.is_empty()).then_some(answers)
}
