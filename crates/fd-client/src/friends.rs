//! Friends list endpoints

use fd_core::social::{Friend, FriendRequest};
use reqwest::Method;
use serde_json::json;
use uuid::Uuid;

use crate::{client::BackendClient, error::ClientError};

impl BackendClient {
    /// Friends of the signed-in user
    pub async fn list_friends(&self) -> Result<Vec<Friend>, ClientError> {
        let request = self.authed(Method::GET, "/rest/v1/friends")?;
        self.send(request).await
    }

    /// Incoming and outgoing friend requests of the signed-in user
    pub async fn list_friend_requests(&self) -> Result<Vec<FriendRequest>, ClientError> {
        let request = self.authed(Method::GET, "/rest/v1/friend-requests")?;
        self.send(request).await
    }

    /// Ask the user called `username` to become a friend
    pub async fn send_friend_request(&self, username: &str) -> Result<FriendRequest, ClientError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ClientError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }

        let request = self
            .authed(Method::POST, "/rest/v1/friend-requests")?
            .json(&json!({ "username": username }));
        self.send(request).await
    }

    /// Accept an incoming friend request
    pub async fn accept_friend_request(&self, request_id: Uuid) -> Result<Friend, ClientError> {
        let request = self.authed(
            Method::POST,
            &format!("/rest/v1/friend-requests/{request_id}/accept"),
        )?;
        self.send(request).await
    }

    /// Decline an incoming request or withdraw an outgoing one
    pub async fn decline_friend_request(&self, request_id: Uuid) -> Result<(), ClientError> {
        let request = self.authed(
            Method::DELETE,
            &format!("/rest/v1/friend-requests/{request_id}"),
        )?;
        self.send_empty(request).await
    }

    /// Remove a user from the friends list
    pub async fn remove_friend(&self, user_id: Uuid) -> Result<(), ClientError> {
        let request = self.authed(Method::DELETE, &format!("/rest/v1/friends/{user_id}"))?;
        self.send_empty(request).await
    }
}
