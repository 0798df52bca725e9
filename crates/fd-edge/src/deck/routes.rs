use axum::{
    Router,
    extract::{Path, State},
    response::Response,
    routing::{get, post},
};
use fd_client::ClientError;
use fd_core::{PublishedDeck, SharedDeckData, UnpublishDeckDialogDeck};
use uuid::Uuid;

use crate::{auth::BearerToken, cors::json_with_cors, error::EdgeError, state::EdgeState};

/// Create the deck sharing routes
pub fn routes() -> Router<EdgeState> {
    Router::new()
        .route("/shared-decks/{share_id}", get(get_shared_deck))
        .route("/decks/{deck_id}/publish", post(publish_deck))
        .route("/decks/{deck_id}/unpublish", post(unpublish_deck))
}

fn parse_deck_id(deck_id: &str) -> Result<Uuid, EdgeError> {
    Uuid::parse_str(deck_id)
        .map_err(|_| EdgeError::BadRequest(format!("Invalid deck id: '{deck_id}'")))
}

/// Public view of a published deck
async fn get_shared_deck(
    State(state): State<EdgeState>,
    Path(share_id): Path<String>,
) -> Result<Response, EdgeError> {
    let shared = state
        .backend
        .get_shared_deck(&share_id)
        .await
        .map_err(|err| match err {
            // A malformed share id cannot name any deck
            ClientError::Validation(_) => EdgeError::NotFound("Shared deck not found".to_string()),
            other => other.into(),
        })?;

    let data = SharedDeckData::from_api(shared)?;
    tracing::info!(
        share_id = %data.share_id(),
        cards = data.card_count(),
        "shared deck served"
    );

    Ok(json_with_cors(&data))
}

async fn publish_deck(
    State(state): State<EdgeState>,
    BearerToken(token): BearerToken,
    Path(deck_id): Path<String>,
) -> Result<Response, EdgeError> {
    let deck_id = parse_deck_id(&deck_id)?;

    let deck = state
        .backend
        .with_access_token(token)
        .publish_deck(deck_id)
        .await?;

    let published = PublishedDeck::from_deck(&deck, &state.public_site_url).map_err(|_| {
        EdgeError::Internal(format!("backend published deck {deck_id} without a share id"))
    })?;
    tracing::info!(%deck_id, share_id = %published.share_id, "deck published");

    Ok(json_with_cors(&published))
}

/// Unpublish a deck and return what the confirmation dialog shows afterwards
async fn unpublish_deck(
    State(state): State<EdgeState>,
    BearerToken(token): BearerToken,
    Path(deck_id): Path<String>,
) -> Result<Response, EdgeError> {
    let deck_id = parse_deck_id(&deck_id)?;

    let deck = state
        .backend
        .with_access_token(token)
        .unpublish_deck(deck_id)
        .await?;

    tracing::info!(%deck_id, "deck unpublished");

    Ok(json_with_cors(&UnpublishDeckDialogDeck::from(&deck)))
}
