//! In-memory stand-in for the hosted backend, served on an ephemeral port.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono::{Duration, Utc};
use fd_client::{BackendClient, ClientConfig};
use fd_core::{
    ApiCard, ApiDeck, ApiSharedDeck, DeckPatch, NewCard, NewDeck,
    auth::{AuthUser, Credentials, Session, SignUp},
    social::{Friend, FriendRequest, FriendRequestStatus, Profile},
};
use serde_json::{Value, json};
use uuid::Uuid;

pub const API_KEY: &str = "test-anon-key";
pub const EMAIL: &str = "maria@example.com";
pub const PASSWORD: &str = "password123";

#[derive(Default)]
struct FakeData {
    user: Option<AuthUser>,
    tokens: Vec<String>,
    decks: HashMap<Uuid, ApiDeck>,
    cards: Vec<ApiCard>,
    friends: Vec<Friend>,
    requests: Vec<FriendRequest>,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    data: Arc<Mutex<FakeData>>,
}

type Reply = Result<Response, Response>;

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl FakeBackend {
    /// Serve the fake backend and return a client pointed at it
    pub async fn spawn() -> (Self, BackendClient) {
        let backend = Self::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let app = backend.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake backend crashed");
        });

        let client = BackendClient::new(&ClientConfig::new(format!("http://{addr}"), API_KEY))
            .expect("Failed to build client");
        (backend, client)
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/auth/v1/signup", post(sign_up))
            .route("/auth/v1/token", post(sign_in))
            .route("/auth/v1/refresh", post(refresh))
            .route("/auth/v1/logout", post(logout))
            .route("/auth/v1/user", get(current_user))
            .route("/rest/v1/friends", get(list_friends))
            .route("/rest/v1/friends/{user_id}", delete(remove_friend))
            .route(
                "/rest/v1/friend-requests",
                get(list_requests).post(send_request),
            )
            .route("/rest/v1/friend-requests/{id}", delete(decline_request))
            .route("/rest/v1/friend-requests/{id}/accept", post(accept_request))
            .route("/rest/v1/decks", get(list_decks).post(create_deck))
            .route(
                "/rest/v1/decks/{id}",
                get(get_deck).patch(update_deck).delete(delete_deck),
            )
            .route("/rest/v1/decks/{id}/cards", get(list_cards).post(create_card))
            .route("/rest/v1/decks/{id}/publish", post(publish))
            .route("/rest/v1/decks/{id}/unpublish", post(unpublish))
            .route("/rest/v1/cards/{id}", patch(update_card).delete(delete_card))
            .route("/rest/v1/shared-decks/{share_id}", get(shared_deck))
            .with_state(self.clone())
    }

    /// Queue an incoming friend request from `username`
    pub fn add_incoming_request(&self, username: &str) -> Uuid {
        let mut data = self.data.lock().unwrap();
        let me = data.user.clone().expect("sign up first");
        let request = FriendRequest {
            id: Uuid::new_v4(),
            from: profile(Uuid::new_v4(), username),
            to: profile(me.id, me.username.as_deref().unwrap_or("me")),
            status: FriendRequestStatus::Pending,
            created_at: Utc::now(),
        };
        let id = request.id;
        data.requests.push(request);
        id
    }

    pub fn token_count(&self) -> usize {
        self.data.lock().unwrap().tokens.len()
    }

    /// Store a raw card record as the backend would, bypassing validation
    pub fn insert_raw_card(&self, card: Value) {
        let card: ApiCard = serde_json::from_value(card).expect("invalid raw card");
        self.data.lock().unwrap().cards.push(card);
    }

    /// Check the project key and the bearer token, returning the current user
    fn authorize(&self, headers: &HeaderMap) -> Result<AuthUser, Response> {
        self.check_api_key(headers)?;
        let data = self.data.lock().unwrap();
        let token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Missing bearer token"))?;

        if !data.tokens.iter().any(|t| t == token) {
            return Err(error(StatusCode::UNAUTHORIZED, "Invalid or expired token"));
        }
        data.user
            .clone()
            .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Unknown user"))
    }

    fn check_api_key(&self, headers: &HeaderMap) -> Result<(), Response> {
        match headers.get("apikey").and_then(|v| v.to_str().ok()) {
            Some(API_KEY) => Ok(()),
            _ => Err(error(StatusCode::UNAUTHORIZED, "Invalid API key")),
        }
    }

    fn issue_session(&self) -> Session {
        let mut data = self.data.lock().unwrap();
        let access_token = Uuid::new_v4().to_string();
        data.tokens.push(access_token.clone());
        Session {
            access_token,
            refresh_token: format!("refresh-{}", Uuid::new_v4()),
            expires_at: Utc::now() + Duration::hours(1),
            user: data.user.clone().expect("user must exist"),
        }
    }
}

fn profile(id: Uuid, username: &str) -> Profile {
    Profile {
        id,
        username: username.to_string(),
        display_name: None,
        avatar_url: None,
    }
}

async fn sign_up(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<SignUp>,
) -> Reply {
    backend.check_api_key(&headers)?;
    {
        let mut data = backend.data.lock().unwrap();
        if data.user.is_some() {
            return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "User already registered"));
        }
        data.user = Some(AuthUser {
            id: Uuid::new_v4(),
            email: body.email,
            username: Some(body.username),
        });
    }
    Ok(Json(backend.issue_session()).into_response())
}

async fn sign_in(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Credentials>,
) -> Reply {
    backend.check_api_key(&headers)?;
    let known = backend
        .data
        .lock()
        .unwrap()
        .user
        .as_ref()
        .is_some_and(|u| u.email == body.email);
    if !known || body.password != PASSWORD {
        return Err(error(StatusCode::BAD_REQUEST, "Invalid login credentials"));
    }
    Ok(Json(backend.issue_session()).into_response())
}

async fn refresh(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    backend.check_api_key(&headers)?;
    let valid = body["refresh_token"]
        .as_str()
        .is_some_and(|t| t.starts_with("refresh-"));
    if !valid {
        return Err(error(StatusCode::BAD_REQUEST, "Invalid refresh token"));
    }
    Ok(Json(backend.issue_session()).into_response())
}

async fn logout(State(backend): State<FakeBackend>, headers: HeaderMap) -> Reply {
    backend.authorize(&headers)?;
    let token = headers["authorization"]
        .to_str()
        .unwrap()
        .trim_start_matches("Bearer ")
        .to_string();
    backend.data.lock().unwrap().tokens.retain(|t| *t != token);
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn current_user(State(backend): State<FakeBackend>, headers: HeaderMap) -> Reply {
    let user = backend.authorize(&headers)?;
    Ok(Json(user).into_response())
}

async fn list_friends(State(backend): State<FakeBackend>, headers: HeaderMap) -> Reply {
    backend.authorize(&headers)?;
    let friends = backend.data.lock().unwrap().friends.clone();
    Ok(Json(friends).into_response())
}

async fn remove_friend(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Reply {
    backend.authorize(&headers)?;
    let mut data = backend.data.lock().unwrap();
    let before = data.friends.len();
    data.friends.retain(|f| f.user_id != user_id);
    if data.friends.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Friend not found"));
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn list_requests(State(backend): State<FakeBackend>, headers: HeaderMap) -> Reply {
    backend.authorize(&headers)?;
    let requests = backend.data.lock().unwrap().requests.clone();
    Ok(Json(requests).into_response())
}

async fn send_request(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let me = backend.authorize(&headers)?;
    let username = body["username"].as_str().unwrap_or_default();
    if username == "ghost" {
        return Err(error(StatusCode::NOT_FOUND, "User not found"));
    }
    let request = FriendRequest {
        id: Uuid::new_v4(),
        from: profile(me.id, me.username.as_deref().unwrap_or("me")),
        to: profile(Uuid::new_v4(), username),
        status: FriendRequestStatus::Pending,
        created_at: Utc::now(),
    };
    backend.data.lock().unwrap().requests.push(request.clone());
    Ok((StatusCode::CREATED, Json(request)).into_response())
}

async fn accept_request(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Reply {
    backend.authorize(&headers)?;
    let mut data = backend.data.lock().unwrap();
    let request = data
        .requests
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Friend request not found"))?;
    request.status = FriendRequestStatus::Accepted;
    let friend = Friend {
        user_id: request.from.id,
        username: request.from.username.clone(),
        display_name: request.from.display_name.clone(),
        avatar_url: None,
        since: Utc::now(),
    };
    data.friends.push(friend.clone());
    Ok(Json(friend).into_response())
}

async fn decline_request(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Reply {
    backend.authorize(&headers)?;
    let mut data = backend.data.lock().unwrap();
    let request = data
        .requests
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Friend request not found"))?;
    request.status = FriendRequestStatus::Declined;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn list_decks(State(backend): State<FakeBackend>, headers: HeaderMap) -> Reply {
    let me = backend.authorize(&headers)?;
    let mut decks: Vec<ApiDeck> = backend
        .data
        .lock()
        .unwrap()
        .decks
        .values()
        .filter(|d| d.owner_id == me.id)
        .cloned()
        .collect();
    decks.sort_by_key(|d| d.created_at);
    Ok(Json(decks).into_response())
}

async fn create_deck(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<NewDeck>,
) -> Reply {
    let me = backend.authorize(&headers)?;
    let deck = ApiDeck {
        id: Uuid::new_v4(),
        owner_id: me.id,
        title: body.title,
        description: body.description,
        is_public: false,
        share_id: None,
        card_count: Some(0),
        published_at: None,
        created_at: Utc::now(),
        updated_at: None,
    };
    backend
        .data
        .lock()
        .unwrap()
        .decks
        .insert(deck.id, deck.clone());
    Ok((StatusCode::CREATED, Json(deck)).into_response())
}

fn with_deck<T>(
    backend: &FakeBackend,
    id: Uuid,
    f: impl FnOnce(&mut ApiDeck) -> T,
) -> Result<T, Response> {
    let mut data = backend.data.lock().unwrap();
    let deck = data
        .decks
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Deck not found"))?;
    Ok(f(deck))
}

async fn get_deck(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Reply {
    backend.authorize(&headers)?;
    let deck = with_deck(&backend, id, |deck| deck.clone())?;
    Ok(Json(deck).into_response())
}

async fn update_deck(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<DeckPatch>,
) -> Reply {
    backend.authorize(&headers)?;
    let deck = with_deck(&backend, id, |deck| {
        if let Some(title) = patch.title {
            deck.title = title;
        }
        if let Some(description) = patch.description {
            deck.description = Some(description);
        }
        deck.updated_at = Some(Utc::now());
        deck.clone()
    })?;
    Ok(Json(deck).into_response())
}

async fn delete_deck(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Reply {
    backend.authorize(&headers)?;
    let mut data = backend.data.lock().unwrap();
    if data.decks.remove(&id).is_none() {
        return Err(error(StatusCode::NOT_FOUND, "Deck not found"));
    }
    data.cards.retain(|c| c.deck_id != id);
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn list_cards(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Reply {
    backend.authorize(&headers)?;
    let mut cards: Vec<ApiCard> = backend
        .data
        .lock()
        .unwrap()
        .cards
        .iter()
        .filter(|c| c.deck_id == id)
        .cloned()
        .collect();
    cards.sort_by_key(|c| c.position);
    Ok(Json(cards).into_response())
}

async fn create_card(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<NewCard>,
) -> Reply {
    backend.authorize(&headers)?;
    let position = with_deck(&backend, id, |deck| {
        let count = deck.card_count.unwrap_or(0) + 1;
        deck.card_count = Some(count);
        count as i32
    })?;
    let card = ApiCard {
        id: Uuid::new_v4(),
        deck_id: id,
        front: body.front,
        back: body.back,
        card_type: body.card_type,
        front_image_url: body.front_image_url,
        back_image_url: body.back_image_url,
        audio_url: body.audio_url,
        accepted_answers: body.accepted_answers,
        wrong_answers: body.wrong_answers,
        position,
        created_at: Utc::now(),
        updated_at: None,
    };
    backend.data.lock().unwrap().cards.push(card.clone());
    Ok((StatusCode::CREATED, Json(card)).into_response())
}

async fn update_card(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<NewCard>,
) -> Reply {
    backend.authorize(&headers)?;
    let mut data = backend.data.lock().unwrap();
    let card = data
        .cards
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Card not found"))?;
    card.front = body.front;
    card.back = body.back;
    card.card_type = body.card_type;
    card.front_image_url = body.front_image_url;
    card.back_image_url = body.back_image_url;
    card.audio_url = body.audio_url;
    card.accepted_answers = body.accepted_answers;
    card.wrong_answers = body.wrong_answers;
    card.updated_at = Some(Utc::now());
    Ok(Json(card.clone()).into_response())
}

async fn delete_card(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Reply {
    backend.authorize(&headers)?;
    let mut data = backend.data.lock().unwrap();
    let before = data.cards.len();
    data.cards.retain(|c| c.id != id);
    if data.cards.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Card not found"));
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn publish(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Reply {
    backend.authorize(&headers)?;
    let deck = with_deck(&backend, id, |deck| {
        deck.is_public = true;
        deck.share_id = Some(deck.id.simple().to_string()[..12].to_string());
        deck.published_at = Some(Utc::now());
        deck.clone()
    })?;
    Ok(Json(deck).into_response())
}

async fn unpublish(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Reply {
    backend.authorize(&headers)?;
    let deck = with_deck(&backend, id, |deck| {
        deck.is_public = false;
        deck.share_id = None;
        deck.published_at = None;
        deck.clone()
    })?;
    Ok(Json(deck).into_response())
}

async fn shared_deck(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(share_id): Path<String>,
) -> Reply {
    backend.check_api_key(&headers)?;
    let data = backend.data.lock().unwrap();
    let deck = data
        .decks
        .values()
        .find(|d| d.is_public && d.share_id.as_deref() == Some(share_id.as_str()))
        .cloned()
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Shared deck not found"))?;
    let owner = data.user.clone().expect("decks have an owner");
    let cards = data
        .cards
        .iter()
        .filter(|c| c.deck_id == deck.id)
        .cloned()
        .collect();

    Ok(Json(ApiSharedDeck {
        deck,
        owner: profile(owner.id, owner.username.as_deref().unwrap_or("owner")),
        cards,
    })
    .into_response())
}
