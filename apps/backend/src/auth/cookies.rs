use std::cell::RefCell;
use std::rc::Rc;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};

use super::session::SessionTokens;

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";
pub const CODE_VERIFIER_COOKIE: &str = "sb-code-verifier";
pub const CSRF_COOKIE: &str = "csrf_token";
pub const CSRF_HEADER: &str = "x-csrf-token";
pub const IDP_STATE_COOKIE: &str = "idp_state";

/// Refresh tokens outlive access tokens; the auth service rotates them.
const REFRESH_TOKEN_MAX_AGE_DAYS: i64 = 60;
const CSRF_MAX_AGE_HOURS: i64 = 12;
const IDP_STATE_MAX_AGE_MINUTES: i64 = 10;

/// Attributes shared by every cookie this service writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieSettings {
    /// `Secure` attribute; on in production
    pub secure: bool,
}

impl CookieSettings {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    fn base(&self, name: &'static str, value: String, same_site: SameSite) -> Cookie<'static> {
        Cookie::build(name, value)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(same_site)
            .finish()
    }

    /// Both session cookies for a token pair.
    pub fn session_pair(&self, tokens: &SessionTokens) -> [Cookie<'static>; 2] {
        let mut access = self.base(
            ACCESS_TOKEN_COOKIE,
            tokens.access_token.clone(),
            SameSite::Lax,
        );
        access.set_max_age(Duration::seconds(tokens.expires_in.max(0)));

        let mut refresh = self.base(
            REFRESH_TOKEN_COOKIE,
            tokens.refresh_token.clone(),
            SameSite::Lax,
        );
        refresh.set_max_age(Duration::days(REFRESH_TOKEN_MAX_AGE_DAYS));

        [access, refresh]
    }

    /// Both session cookies emptied with max-age 0.
    pub fn cleared_session_pair(&self) -> [Cookie<'static>; 2] {
        [
            self.removal(ACCESS_TOKEN_COOKIE),
            self.removal(REFRESH_TOKEN_COOKIE),
        ]
    }

    pub fn csrf(&self, token: &str) -> Cookie<'static> {
        let mut cookie = self.base(CSRF_COOKIE, token.to_string(), SameSite::Strict);
        cookie.set_max_age(Duration::hours(CSRF_MAX_AGE_HOURS));
        cookie
    }

    pub fn idp_state(&self, state: &str) -> Cookie<'static> {
        let mut cookie = self.base(IDP_STATE_COOKIE, state.to_string(), SameSite::Lax);
        cookie.set_max_age(Duration::minutes(IDP_STATE_MAX_AGE_MINUTES));
        cookie
    }

    /// Empty value, max-age 0: the browser drops the cookie.
    pub fn removal(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.base(name, String::new(), SameSite::Lax);
        cookie.set_max_age(Duration::ZERO);
        cookie
    }
}

/// Pending change to the session cookie pair. One value covers both cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionWrite {
    Set(SessionTokens),
    Clear,
}

#[derive(Debug, Default)]
struct PendingCookies {
    session: Option<SessionWrite>,
    others: Vec<Cookie<'static>>,
}

/// Per-request accumulator of cookies to emit on the response.
///
/// Installed in request extensions by the session middleware and flushed by
/// it once the handler has produced a response. Handles are cheap clones of
/// the same request-local buffer.
#[derive(Debug, Clone, Default)]
pub struct ResponseCookies(Rc<RefCell<PendingCookies>>);

impl ResponseCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session pair; the last write in a request wins.
    pub fn set_session(&self, tokens: SessionTokens) {
        self.0.borrow_mut().session = Some(SessionWrite::Set(tokens));
    }

    pub fn clear_session(&self) {
        self.0.borrow_mut().session = Some(SessionWrite::Clear);
    }

    /// Queue a non-session cookie (CSRF, OAuth state, ...).
    pub fn add(&self, cookie: Cookie<'static>) {
        let mut pending = self.0.borrow_mut();
        pending.others.retain(|c| c.name() != cookie.name());
        pending.others.push(cookie);
    }

    pub fn session_write(&self) -> Option<SessionWrite> {
        self.0.borrow().session.clone()
    }

    pub fn is_empty(&self) -> bool {
        let pending = self.0.borrow();
        pending.session.is_none() && pending.others.is_empty()
    }

    /// Drain everything queued, rendering the session write as its cookie pair.
    pub fn take(&self, settings: &CookieSettings) -> Vec<Cookie<'static>> {
        let mut pending = self.0.borrow_mut();
        let mut cookies = std::mem::take(&mut pending.others);
        match pending.session.take() {
            Some(SessionWrite::Set(tokens)) => cookies.extend(settings.session_pair(&tokens)),
            Some(SessionWrite::Clear) => cookies.extend(settings.cleared_session_pair()),
            None => {}
        }
        cookies
    }
}
