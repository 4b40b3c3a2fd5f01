//! Rate limiting configuration helpers.
//!
//! - Sign-in / sign-out and the external IdP redirects: 10 requests per minute per IP
//! - User search: 60 requests per minute per IP
//! - Everything else is not limited

use std::time::Duration;

use actix_extensible_rate_limit::backend::SimpleInputFunctionBuilder;

const WINDOW: Duration = Duration::from_secs(60);

/// Limits for `/api/auth/*` and `/api/idp/*`.
pub fn auth_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(WINDOW, 10).real_ip_key()
}

/// Limits for `/api/users/search`.
pub fn search_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(WINDOW, 60).real_ip_key()
}
