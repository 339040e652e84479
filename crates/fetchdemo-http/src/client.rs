use fetchdemo_core::{ApiConfig, Error, NewPost, NewUser, Post, Result, User};
use futures::TryFutureExt as _;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Users collection, relative to the base URL.
const USERS_PATH: &str = "/users";
/// Posts collection, relative to the base URL.
const POSTS_PATH: &str = "/posts";
/// Content type declared on write requests.
const JSON_CONTENT_TYPE: &str = "application/json";

/// What to do when the fixture API answers with a non-success status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Return [`Error::Status`] without parsing the body.
    #[default]
    Strict,
    /// Log the status and parse the body anyway.
    Lenient,
}

/// Requests issued by the client, used for logging and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    /// `GET /users`
    ListUsers,
    /// `POST /posts`
    CreatePost,
    /// `POST /users`
    CreateUser,
}

impl Operation {
    /// Human-readable name used in errors.
    fn name(self) -> &'static str {
        match self {
            Self::ListUsers => "list users",
            Self::CreatePost => "create post",
            Self::CreateUser => "create user",
        }
    }

    fn is_write(self) -> bool {
        !matches!(self, Self::ListUsers)
    }
}

/// Client for the users and posts collections of the fixture API.
#[derive(Debug, Clone)]
pub struct FixtureClient {
    /// HTTP client used for every request.
    client: Client,
    /// Full URL of the users collection.
    users_url: String,
    /// Full URL of the posts collection.
    posts_url: String,
    /// Handling of non-success statuses.
    policy: StatusPolicy,
}

impl FixtureClient {
    /// Creates a strict client rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            client: Client::default(),
            users_url: format!("{base_url}{USERS_PATH}"),
            posts_url: format!("{base_url}{POSTS_PATH}"),
            policy: StatusPolicy::default(),
        }
    }

    /// Creates a client from the `[api]` configuration section.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        let policy = if config.lenient {
            StatusPolicy::Lenient
        } else {
            StatusPolicy::Strict
        };
        Self::new(&config.base_url).with_policy(policy)
    }

    /// Sets the status policy.
    #[must_use]
    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the underlying HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Current status policy.
    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    /// Full URL of the users collection.
    pub fn users_url(&self) -> &str {
        &self.users_url
    }

    /// Full URL of the posts collection.
    pub fn posts_url(&self) -> &str {
        &self.posts_url
    }

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not a JSON array of
    /// users, or (strict policy) the status is not a success.
    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        let request = self.client.get(&self.users_url);
        self.execute(request, Operation::ListUsers).await
    }

    /// Lists all users through a combinator chain instead of sequential awaits.
    ///
    /// Behaves exactly like [`FixtureClient::fetch_users`].
    ///
    /// # Errors
    ///
    /// Same as [`FixtureClient::fetch_users`].
    pub async fn fetch_users_chained(&self) -> Result<Vec<User>> {
        let policy = self.policy;
        self.client
            .get(&self.users_url)
            .send()
            .map_err(Error::from)
            .and_then(move |response| check_status(response, Operation::ListUsers, policy))
            .and_then(parse_body::<Vec<User>>)
            .await
    }

    /// Creates a post and returns the server's echo of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not a post, or
    /// (strict policy) the status is not a success.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let request = self.json_request(&self.posts_url).json(post);
        self.execute(request, Operation::CreatePost).await
    }

    /// Creates a user and returns the server's echo of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body is not a user, or
    /// (strict policy) the status is not a success.
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        let request = self.json_request(&self.users_url).json(user);
        self.execute(request, Operation::CreateUser).await
    }

    /// POST builder declaring a JSON body.
    fn json_request(&self, url: &str) -> RequestBuilder {
        self.client.post(url).header(CONTENT_TYPE, JSON_CONTENT_TYPE)
    }

    /// Issues the request, validates the status and parses the body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: Operation,
    ) -> Result<T> {
        debug!("Sending {} request", operation.name());
        let response = request.send().await?;
        let response = check_status(response, operation, self.policy).await?;
        parse_body(response).await
    }
}

/// Applies the status policy to a response.
async fn check_status(
    response: Response,
    operation: Operation,
    policy: StatusPolicy,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match policy {
        StatusPolicy::Lenient => {
            log_failed_status(operation, status);
            Ok(response)
        }
        StatusPolicy::Strict => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            Err(Error::Status {
                operation: operation.name(),
                status,
                body,
            })
        }
    }
}

fn log_failed_status(operation: Operation, status: StatusCode) {
    if operation.is_write() {
        warn!("ERROR: {}", status.as_u16());
        warn!("ERROR: {}", status.canonical_reason().unwrap_or("Unknown"));
    } else {
        warn!("Status code: {}", status.as_u16());
    }
}

/// Reads the whole body and decodes it as JSON.
async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults_to_strict() {
        let client = FixtureClient::new("https://jsonplaceholder.typicode.com");
        assert_eq!(client.policy(), StatusPolicy::Strict);
        assert_eq!(client.users_url(), "https://jsonplaceholder.typicode.com/users");
        assert_eq!(client.posts_url(), "https://jsonplaceholder.typicode.com/posts");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = FixtureClient::new("http://localhost:3000/");
        assert_eq!(client.users_url(), "http://localhost:3000/users");
    }

    #[test]
    fn test_from_config_maps_lenient_flag() {
        let config = ApiConfig {
            base_url: "http://localhost:3000".to_owned(),
            lenient: true,
        };
        let client = FixtureClient::from_config(&config);
        assert_eq!(client.policy(), StatusPolicy::Lenient);
        assert_eq!(client.posts_url(), "http://localhost:3000/posts");
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::ListUsers.name(), "list users");
        assert!(!Operation::ListUsers.is_write());
        assert!(Operation::CreatePost.is_write());
        assert!(Operation::CreateUser.is_write());
    }
}
