use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use time::OffsetDateTime;

use super::client::AuthUser;

/// Seconds before `exp` at which an access token already counts as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

/// The access/refresh pair. Always written and cleared as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// What the session middleware resolved for this request.
///
/// Downstream handlers read this instead of re-reading cookies, so a refresh
/// performed earlier in the same request is visible to them.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user: Option<AuthUser>,
    /// Access token valid for this request (post-refresh if one happened)
    pub access_token: Option<String>,
    pub refreshed: bool,
}

/// Local view of an access token, decided without a network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTokenState {
    Fresh,
    Expired,
    /// Not a JWT or no `exp` claim; treated like an expired token
    Unreadable,
}

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: Option<i64>,
}

/// Reads the unverified `exp` claim. Signature checks belong to the auth
/// service; this only decides between `get_user` and `refresh_session`.
pub fn inspect_access_token(token: &str, now: OffsetDateTime) -> AccessTokenState {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return AccessTokenState::Unreadable,
    };

    let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) else {
        return AccessTokenState::Unreadable;
    };

    match serde_json::from_slice::<ExpiryClaim>(&bytes) {
        Ok(ExpiryClaim { exp: Some(exp) }) => {
            if exp.saturating_sub(EXPIRY_MARGIN_SECS) > now.unix_timestamp() {
                AccessTokenState::Fresh
            } else {
                AccessTokenState::Expired
            }
        }
        _ => AccessTokenState::Unreadable,
    }
}
