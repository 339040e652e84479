//! In-process stand-in for the fixture API.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use fetchdemo_core::IgnoreLock as _;
use fetchdemo_http::FixtureClient;
use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Shared state of a running fixture server.
#[derive(Clone, Default)]
pub struct Fixture {
    /// Status every endpoint answers with instead of success, if set.
    failure: Option<StatusCode>,
    /// `METHOD /path` of every request, in arrival order.
    requests: Arc<Mutex<Vec<String>>>,
}

impl Fixture {
    /// A fixture that answers every request successfully.
    pub fn healthy() -> Self {
        Self::default()
    }

    /// A fixture that answers every request with `status`, still sending a body.
    pub fn failing(status: StatusCode) -> Self {
        Self {
            failure: Some(status),
            ..Self::default()
        }
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock_ignore_poison().clone()
    }

    fn record(&self, request: &str) {
        self.requests.lock_ignore_poison().push(request.to_owned());
    }

    fn status_or(&self, success: StatusCode) -> StatusCode {
        self.failure.unwrap_or(success)
    }

    /// Router serving `/users` and `/posts` like the public fixture API.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/users", get(list_users).post(create_user))
            .route("/posts", post(create_post))
            .with_state(self.clone())
    }
}

/// Users as the public API returns them, extra fields included.
pub fn sample_users() -> Value {
    json!([
        {
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "phone": "1-770-736-8031 x56442",
            "address": { "city": "Gwenborough" }
        },
        {
            "id": 2,
            "name": "Ervin Howell",
            "username": "Antonette",
            "email": "Shanna@melissa.tv",
            "website": "anastasia.net"
        },
        {
            "id": 3,
            "name": "Clementine Bauch",
            "username": "Samantha",
            "email": "Nathan@yesenia.net"
        }
    ])
}

async fn list_users(State(fixture): State<Fixture>) -> (StatusCode, Json<Value>) {
    fixture.record("GET /users");
    (fixture.status_or(StatusCode::OK), Json(sample_users()))
}

async fn create_user(
    State(fixture): State<Fixture>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fixture.record("POST /users");
    body["id"] = json!(11);
    (fixture.status_or(StatusCode::CREATED), Json(body))
}

async fn create_post(
    State(fixture): State<Fixture>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fixture.record("POST /posts");
    body["id"] = json!(101);
    (fixture.status_or(StatusCode::CREATED), Json(body))
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|err| panic!("Failed to bind fixture listener: {err}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|err| panic!("Failed to read fixture address: {err}"));
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .unwrap_or_else(|err| panic!("Fixture server failed: {err}"));
    });
    format!("http://{addr}")
}

/// Client for `base_url` that ignores proxy settings from the environment.
pub fn client_for(base_url: &str) -> FixtureClient {
    let http = Client::builder()
        .no_proxy()
        .build()
        .unwrap_or_else(|err| panic!("Failed to build HTTP client: {err}"));
    FixtureClient::new(base_url).with_client(http)
}
