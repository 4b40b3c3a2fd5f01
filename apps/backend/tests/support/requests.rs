//! Request decorations shared by the route suites.

use actix_web::cookie::Cookie;
use actix_web::test::TestRequest;
use backend::auth::cookies::{ACCESS_TOKEN_COOKIE, CSRF_COOKIE, CSRF_HEADER};

use super::tokens::fresh_access_token;

pub const CSRF_TOKEN: &str = "csrf-test-token";

/// Carry a fresh access token; the fake auth resolves it to its user.
pub fn signed_in(req: TestRequest) -> TestRequest {
    req.cookie(Cookie::new(ACCESS_TOKEN_COOKIE, fresh_access_token()))
}

/// Matching double-submit cookie and header.
pub fn with_csrf(req: TestRequest) -> TestRequest {
    req.cookie(Cookie::new(CSRF_COOKIE, CSRF_TOKEN))
        .insert_header((CSRF_HEADER, CSRF_TOKEN))
}
