//! Auth API client
//!
//! Each operation is an independent, at-most-once HTTP exchange: serialize
//! the request DTO, send, and map the response through one shared decoding
//! path. No retries and no caching of in-flight requests.

use crate::config::ApiConfig;
use crate::types::{
    ApiErrorBody, AppleLoginRequest, AuthResponse, GoogleLoginRequest, LoginRequest, MeResponse,
    RegisterRequest, User,
};
use reqwest::{Client as ReqwestClient, Response as ReqwestResponse, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use storage::SecretStore;
use thiserror::Error;

/// Auth API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// An authenticated call was attempted with no stored token
    #[error("Missing token. Please sign in again.")]
    MissingToken,

    /// The response could not be read as an HTTP exchange
    #[error("Invalid response from the server.")]
    InvalidResponse,

    /// The server explicitly rejected the request
    #[error("{message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Server-supplied message, or the generic reason phrase for the status
        message: String,
    },

    /// Transport failure: no response was received at all
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A declared-successful response carried an undecodable body
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether this failure is a pure transport problem, as opposed to an
    /// authoritative answer from the server
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

/// Result type for auth API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// HTTP client for the auth API
///
/// # Examples
/// ```rust,no_run
/// use api_client::{ApiClient, ApiConfig};
/// use storage::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(ApiConfig::from_env(), MemoryStore::new().shared());
/// let response = client.login("ana@example.com", "secret").await?;
/// println!("Logged in as {}", response.user.full_name);
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    http: ReqwestClient,
    config: ApiConfig,
    store: Arc<dyn SecretStore>,
}

impl ApiClient {
    /// Create a new client over a secret store
    pub fn new(config: ApiConfig, store: Arc<dyn SecretStore>) -> Self {
        let http = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { http, config, store }
    }

    /// Register a new account
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        let body = RegisterRequest {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("auth/register", &body).await
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("auth/login", &body).await
    }

    /// Login with a Google identity
    pub async fn google_login(
        &self,
        google_id: &str,
        email: &str,
        full_name: &str,
        profile_picture: Option<&str>,
    ) -> Result<AuthResponse> {
        let body = GoogleLoginRequest {
            google_id: google_id.to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            profile_picture: profile_picture.map(str::to_string),
        };
        self.post("auth/google", &body).await
    }

    /// Login with an Apple identity
    pub async fn apple_login(
        &self,
        apple_id: &str,
        email: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<AuthResponse> {
        let body = AppleLoginRequest {
            apple_id: apple_id.to_string(),
            email: email.map(str::to_string),
            full_name: full_name.map(str::to_string),
        };
        self.post("auth/apple", &body).await
    }

    /// Fetch the user owning the stored bearer token
    ///
    /// Fails with [`ApiError::MissingToken`] before any request is sent when
    /// the credential store holds no token. A store read failure is treated
    /// the same as an absent token.
    pub async fn get_current_user(&self) -> Result<User> {
        let token = match self.store.get().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Secret store read failed, treating as no token: {}", e);
                None
            }
        };
        let token = token.ok_or(ApiError::MissingToken)?;

        let url = self.endpoint("auth/me");
        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        let me: MeResponse = Self::parse_response(response).await?;
        Ok(me.user)
    }

    /// Get the client configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, "auth request");

        let response = self.http.post(&url).json(body).send().await?;
        Self::parse_response(response).await
    }

    /// Shared response handling for all five operations
    async fn parse_response<T>(response: ReqwestResponse) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|_| ApiError::InvalidResponse)?;

        if status.is_success() {
            // Decode failure on a declared-successful response is fatal for
            // this call, not retried or swallowed.
            return Ok(serde_json::from_slice(&body)?);
        }

        let message = match serde_json::from_slice::<ApiErrorBody>(&body) {
            Ok(error_body) => error_body.error,
            Err(_) => Self::reason_phrase(status),
        };

        tracing::warn!(status = status.as_u16(), %message, "auth request rejected");
        Err(ApiError::ServerError { status: status.as_u16(), message })
    }

    fn reason_phrase(status: StatusCode) -> String {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    }
}
