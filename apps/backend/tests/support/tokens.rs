//! Access tokens shaped like the auth service's JWTs.
//!
//! Only the `exp` claim matters to the backend; signatures are never checked
//! locally, so the header and signature segments are placeholders.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use time::OffsetDateTime;

pub fn access_token_expiring_in(seconds: i64) -> String {
    let exp = OffsetDateTime::now_utc().unix_timestamp() + seconds;
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"test","exp":{exp}}}"#));
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig")
}

pub fn fresh_access_token() -> String {
    access_token_expiring_in(3600)
}

pub fn expired_access_token() -> String {
    access_token_expiring_in(-60)
}
