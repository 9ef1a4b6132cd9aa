use crate::backend::AuthBackend;
use crate::cache::KeyValueStore;
use crate::{AuthFailure, Identity, Profile, Role, SessionError, SessionResult};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Store key for the persisted access token.
pub const TOKEN_KEY: &str = "breakfree.auth.token";

const API_KEY_HEADER: &str = "apikey";

/// Client for a Supabase-compatible auth + REST service.
pub struct RemoteBackend {
    base_url: String,
    anon_key: String,
    request_timeout: Duration,
    client: ReqwestClient,
    access_token: RwLock<Option<String>>,
    token_store: Option<Arc<dyn KeyValueStore>>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: UserDto,
}

#[derive(Deserialize)]
struct UserDto {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct ProfileDto {
    id: Uuid,
    #[serde(default, alias = "full_name")]
    name: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

/// Error bodies differ between the auth and REST endpoints.
#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn text(&self) -> String {
        self.error_description
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.message.as_deref())
            .unwrap_or("no details")
            .to_string()
    }
}

impl From<UserDto> for Identity {
    fn from(user: UserDto) -> Self {
        Identity::new(user.id, user.email.unwrap_or_default())
    }
}

impl From<ProfileDto> for Profile {
    fn from(dto: ProfileDto) -> Self {
        Profile {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
            role: dto.role.as_deref().map(Role::from_tag).unwrap_or_default(),
            avatar_url: dto.avatar_url,
        }
    }
}

impl RemoteBackend {
    /// Create a new backend
    ///
    /// # Arguments
    /// * `base_url` - Project URL (e.g., "https://xyz.supabase.co")
    /// * `anon_key` - Public API key sent with every request
    /// * `request_timeout` - Transport-level bound on a single HTTP request
    pub fn new(base_url: &str, anon_key: &str, request_timeout: Duration) -> SessionResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| SessionError::unexpected(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            request_timeout,
            client,
            access_token: RwLock::new(None),
            token_store: None,
        })
    }

    /// Persist the access token so a later process can restore the session.
    pub fn with_token_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, bearer: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header(API_KEY_HEADER, &self.anon_key)
            .bearer_auth(bearer)
    }

    async fn send(&self, operation: &str, req: RequestBuilder) -> SessionResult<Response> {
        req.send()
            .await
            .map_err(|e| self.transport_error(operation, e))
    }

    fn transport_error(&self, operation: &str, err: reqwest::Error) -> SessionError {
        if err.is_timeout() {
            SessionError::timeout(operation, self.request_timeout)
        } else if err.is_decode() || err.is_body() {
            SessionError::unexpected(format!("{operation}: malformed response: {err}"))
        } else {
            SessionError::connection(format!("{operation}: {err}"))
        }
    }

    async fn error_body(response: Response) -> ErrorBody {
        response.json::<ErrorBody>().await.unwrap_or_default()
    }

    /// Map a non-success status that no endpoint handles specially.
    async fn status_error(operation: &str, response: Response) -> SessionError {
        let status = response.status();
        let body = Self::error_body(response).await;

        match status {
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                SessionError::connection(format!("{operation}: service unavailable ({status})"))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                SessionError::authentication(AuthFailure::RateLimited, body.text())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SessionError::permission_denied(format!("{operation}: {}", body.text()))
            }
            _ => SessionError::unexpected(format!(
                "{operation}: unexpected status {status}: {}",
                body.text()
            )),
        }
    }

    async fn current_token(&self) -> Option<String> {
        if let Some(token) = self.access_token.read().await.clone() {
            return Some(token);
        }

        let store = self.token_store.as_ref()?;
        match store.get(TOKEN_KEY) {
            Ok(Some(token)) => {
                *self.access_token.write().await = Some(token.clone());
                Some(token)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read stored access token: {e}");
                None
            }
        }
    }

    async fn remember_token(&self, token: &str) {
        *self.access_token.write().await = Some(token.to_string());

        if let Some(store) = &self.token_store
            && let Err(e) = store.set(TOKEN_KEY, token)
        {
            warn!("Failed to persist access token: {e}");
        }
    }

    async fn forget_token(&self) -> Option<String> {
        let token = self.access_token.write().await.take();

        if let Some(store) = &self.token_store
            && let Err(e) = store.remove(TOKEN_KEY)
        {
            warn!("Failed to remove stored access token: {e}");
        }

        token
    }
}

#[async_trait]
impl AuthBackend for RemoteBackend {
    async fn get_session(&self) -> SessionResult<Option<Identity>> {
        let Some(token) = self.current_token().await else {
            debug!("No access token, no remote session");
            return Ok(None);
        };

        let req = self.request(Method::GET, "/auth/v1/user", &token);
        let response = self.send("get_session", req).await?;

        match response.status() {
            status if status.is_success() => {
                let user: UserDto = response
                    .json()
                    .await
                    .map_err(|e| self.transport_error("get_session", e))?;
                Ok(Some(user.into()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("Stored access token rejected, discarding it");
                self.forget_token().await;
                Ok(None)
            }
            _ => Err(Self::status_error("get_session", response).await),
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> SessionResult<Identity> {
        let req = self
            .request(
                Method::POST,
                "/auth/v1/token?grant_type=password",
                &self.anon_key,
            )
            .json(&PasswordGrant { email, password });
        let response = self.send("sign_in", req).await?;

        match response.status() {
            status if status.is_success() => {
                let token: TokenResponse = response
                    .json()
                    .await
                    .map_err(|e| self.transport_error("sign_in", e))?;
                self.remember_token(&token.access_token).await;
                Ok(token.user.into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
                let body = Self::error_body(response).await;
                let text = body.text();
                let not_confirmed = body.error_code.as_deref() == Some("email_not_confirmed")
                    || text.to_lowercase().contains("not confirmed");
                let kind = if not_confirmed {
                    AuthFailure::EmailNotConfirmed
                } else {
                    AuthFailure::InvalidCredentials
                };
                Err(SessionError::authentication(kind, text))
            }
            _ => Err(Self::status_error("sign_in", response).await),
        }
    }

    async fn sign_out(&self) -> SessionResult<()> {
        let Some(token) = self.forget_token().await else {
            return Ok(());
        };

        let req = self.request(Method::POST, "/auth/v1/logout", &token);
        let response = self.send("sign_out", req).await?;

        match response.status() {
            // An expired token is already signed out
            status if status.is_success() || status == StatusCode::UNAUTHORIZED => Ok(()),
            _ => Err(Self::status_error("sign_out", response).await),
        }
    }

    async fn get_profile(&self, id: Uuid) -> SessionResult<Profile> {
        let bearer = self
            .current_token()
            .await
            .unwrap_or_else(|| self.anon_key.clone());
        let path = format!("/rest/v1/profiles?id=eq.{id}&select=*");
        let req = self.request(Method::GET, &path, &bearer);
        let response = self.send("get_profile", req).await?;

        if !response.status().is_success() {
            return Err(Self::status_error("get_profile", response).await);
        }

        let rows: Vec<ProfileDto> = response
            .json()
            .await
            .map_err(|e| self.transport_error("get_profile", e))?;

        rows.into_iter()
            .next()
            .map(Profile::from)
            .ok_or_else(|| SessionError::not_found(format!("no profile for user {id}")))
    }
}
