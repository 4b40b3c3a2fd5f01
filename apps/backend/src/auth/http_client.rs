use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::client::{AuthClient, AuthError, AuthSession, AuthUser};
use super::session::SessionTokens;
use crate::config::AuthServiceConfig;
use crate::error::AppError;

/// `AuthClient` backed by the hosted auth REST API.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    http: Client,
    config: AuthServiceConfig,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: AuthUser,
}

impl From<TokenResponse> for AuthSession {
    fn from(value: TokenResponse) -> Self {
        Self {
            tokens: SessionTokens {
                access_token: value.access_token,
                refresh_token: value.refresh_token,
                expires_in: value.expires_in,
            },
            user: value.user,
        }
    }
}

impl HttpAuthClient {
    pub fn new(config: AuthServiceConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build auth HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    fn with_keys(&self, builder: RequestBuilder, bearer: &str) -> RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AuthError> {
        let response = builder
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))
    }

    async fn token_grant(&self, grant_type: &str, body: Value) -> Result<AuthSession, AuthError> {
        let url = self.config.endpoint(&format!("token?grant_type={grant_type}"));
        let builder = self
            .with_keys(self.http.post(url), &self.config.anon_key)
            .json(&body);
        let token: TokenResponse = self.send(builder).await?;
        Ok(token.into())
    }
}

/// Map a non-2xx answer to an `AuthError`.
async fn check_status(response: Response) -> Result<Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: Value = response.json().await.unwrap_or(Value::Null);
    let message = upstream_message(&body);
    debug!(status = status.as_u16(), "auth service returned error");

    Err(classify(status, &body, message))
}

fn upstream_message(body: &Value) -> String {
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .unwrap_or("no message")
        .to_string()
}

fn classify(status: StatusCode, body: &Value, message: String) -> AuthError {
    let invalid_grant = body.get("error").and_then(Value::as_str) == Some("invalid_grant")
        || body.get("error_code").and_then(Value::as_str) == Some("refresh_token_not_found");

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN || invalid_grant {
        AuthError::Rejected(message)
    } else if status.is_client_error() {
        AuthError::BadRequest {
            status: status.as_u16(),
            message,
        }
    } else {
        AuthError::Unavailable(format!("status {}: {message}", status.as_u16()))
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let builder = self.with_keys(self.http.get(self.config.endpoint("user")), access_token);
        self.send(builder).await
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        self.token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<AuthSession, AuthError> {
        self.token_grant(
            "pkce",
            json!({ "auth_code": auth_code, "code_verifier": code_verifier }),
        )
        .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let builder = self.with_keys(self.http.post(self.config.endpoint("logout")), access_token);
        let response = builder
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        check_status(response).await.map(|_| ())
    }
}
