use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::session::SessionTokens;

/// Identity returned by the auth API for a valid access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// A fresh session: the new token pair and the user it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub tokens: SessionTokens,
    pub user: AuthUser,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    /// Token missing, expired, revoked or otherwise rejected (401/403 upstream)
    #[error("session rejected by auth service: {0}")]
    Rejected(String),
    /// Request rejected for a reason other than the session (4xx upstream)
    #[error("auth request invalid ({status}): {message}")]
    BadRequest { status: u16, message: String },
    /// Network failure or 5xx upstream
    #[error("auth service unavailable: {0}")]
    Unavailable(String),
    /// Upstream answered with a body we could not decode
    #[error("unexpected auth response: {0}")]
    Decode(String),
}

/// The hosted auth API as seen by this service.
///
/// Every method is a single network round trip.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Resolve the user behind a (non-expired) access token.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;

    /// Trade a refresh token for a new token pair. The old pair is void afterwards.
    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;

    /// Complete the OAuth PKCE handshake.
    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Revoke the session server-side.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
