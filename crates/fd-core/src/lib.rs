//! Shared data shapes of flashdeck: cards, decks, friends, sessions and the
//! error payload the hosted backend speaks.

pub mod auth;
pub mod card;
pub mod deck;
pub mod error;
pub mod normalization;
pub mod social;
pub mod validation;

pub use card::{ApiCard, CardFormDraft, CardType, NewCard, UiCard, map_api_card_to_ui_card};
pub use deck::{
    ApiDeck, ApiSharedDeck, DeckPatch, NewDeck, PublishedDeck, SharedDeckData,
    UnpublishDeckDialogDeck,
};
pub use error::{
    ApiErrorResponse, CoreError, error_message, error_message_of, is_api_error_response,
};
