//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use gamecart_cart::domain::settings::CheckoutSettings;
use gamecart_core::game::Game;
use gamecart_core::publisher::NotificationPublisher;
use gamecart_core::user::User;
use gamecart_test_support::{
    FixedClock, InMemoryGameRepository, InMemoryUserRepository, RecordingPublisher, fixed_now,
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use gamecart_api::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use gamecart_api::routes;
use gamecart_api::state::AppState;

/// In-memory collaborators behind a test app, kept for assertions.
pub struct TestBackend {
    pub users: Arc<InMemoryUserRepository>,
    pub games: Arc<InMemoryGameRepository>,
    pub publisher: Arc<RecordingPublisher>,
}

impl TestBackend {
    /// Seeds `users` and `games` with a recording publisher.
    pub fn new(users: Vec<User>, games: Vec<Game>) -> Self {
        let repo = InMemoryUserRepository::new();
        for user in users {
            repo.insert(user);
        }
        Self {
            users: Arc::new(repo),
            games: Arc::new(InMemoryGameRepository::new(games)),
            publisher: Arc::new(RecordingPublisher::new()),
        }
    }

    /// Builds the full app router with default checkout settings.
    pub fn app(&self) -> Router {
        self.app_with(CheckoutSettings::default())
    }

    /// Builds the full app router with the given checkout settings. Uses the
    /// same route structure as `main.rs`.
    pub fn app_with(&self, settings: CheckoutSettings) -> Router {
        let publisher: Arc<dyn NotificationPublisher> = self.publisher.clone();
        build_test_app(
            AppState::new(
                Arc::new(FixedClock(fixed_now())),
                self.users.clone(),
                self.games.clone(),
                publisher,
                settings,
            ),
        )
    }
}

/// Build the full app router around `state`.
pub fn build_test_app(state: AppState) -> Router {
    routes::app_router(state)
}

/// Send a request as `user_id` with the given role and return the response.
pub async fn send_as(
    app: Router,
    method: &str,
    uri: &str,
    identity: Option<(Uuid, &str)>,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user_id, role)) = identity {
        builder = builder
            .header(USER_ID_HEADER, user_id.to_string())
            .header(USER_ROLE_HEADER, role);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body as a player.
pub async fn post_json(
    app: Router,
    uri: &str,
    user_id: Uuid,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_as(app, "POST", uri, Some((user_id, "Player")), Some(body)).await
}

/// Send a bodiless POST request as a player.
pub async fn post_empty(app: Router, uri: &str, user_id: Uuid) -> (StatusCode, serde_json::Value) {
    send_as(app, "POST", uri, Some((user_id, "Player")), None).await
}

/// Send a GET request as a player.
pub async fn get_json(app: Router, uri: &str, user_id: Uuid) -> (StatusCode, serde_json::Value) {
    send_as(app, "GET", uri, Some((user_id, "Player")), None).await
}

/// Send a DELETE request as a player.
pub async fn delete_json(app: Router, uri: &str, user_id: Uuid) -> (StatusCode, serde_json::Value) {
    send_as(app, "DELETE", uri, Some((user_id, "Player")), None).await
}
