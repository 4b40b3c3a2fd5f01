//! In-memory stand-in for the hosted auth API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backend::auth::{AuthClient, AuthError, AuthSession, AuthUser, SessionTokens};
use uuid::Uuid;

/// How the fake answers every call.
#[derive(Debug, Clone)]
pub enum Behavior {
    Succeed,
    Reject,
    Unavailable,
}

pub struct FakeAuth {
    pub user: AuthUser,
    behavior: Behavior,
    pub get_user_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub exchange_calls: AtomicUsize,
    pub sign_out_calls: AtomicUsize,
    /// Last (code, verifier) passed to `exchange_code`
    pub last_exchange: Mutex<Option<(String, String)>>,
}

impl FakeAuth {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Self::for_user(
            AuthUser {
                id: Uuid::new_v4(),
                email: Some("member@example.com".to_string()),
                role: Some("authenticated".to_string()),
            },
            behavior,
        )
    }

    pub fn for_user(user: AuthUser, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            user,
            behavior,
            get_user_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            exchange_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
            last_exchange: Mutex::new(None),
        })
    }

    pub fn succeeding() -> Arc<Self> {
        Self::new(Behavior::Succeed)
    }

    /// Total upstream calls made for session resolution.
    pub fn session_calls(&self) -> usize {
        self.get_user_calls.load(Ordering::SeqCst) + self.refresh_calls.load(Ordering::SeqCst)
    }

    fn outcome<T>(&self, ok: impl FnOnce() -> T) -> Result<T, AuthError> {
        match self.behavior {
            Behavior::Succeed => Ok(ok()),
            Behavior::Reject => Err(AuthError::Rejected("invalid JWT".to_string())),
            Behavior::Unavailable => Err(AuthError::Unavailable("connection refused".to_string())),
        }
    }

    fn session(&self, suffix: &str) -> AuthSession {
        AuthSession {
            tokens: SessionTokens {
                access_token: format!("access-{suffix}"),
                refresh_token: format!("refresh-{suffix}"),
                expires_in: 3600,
            },
            user: self.user.clone(),
        }
    }
}

#[async_trait]
impl AuthClient for FakeAuth {
    async fn get_user(&self, _access_token: &str) -> Result<AuthUser, AuthError> {
        self.get_user_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome(|| self.user.clone())
    }

    async fn refresh_session(&self, _refresh_token: &str) -> Result<AuthSession, AuthError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome(|| self.session("refreshed"))
    }

    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<AuthSession, AuthError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_exchange.lock().unwrap() =
            Some((auth_code.to_string(), code_verifier.to_string()));
        self.outcome(|| self.session("exchanged"))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome(|| ())
    }
}
