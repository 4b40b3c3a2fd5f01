//! Identity extractors backed by the session middleware's [`SessionContext`].

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

use crate::auth::{ResponseCookies, SessionContext};
use crate::error::AppError;

/// The signed-in caller. Rejects with 401 when the session did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub access_token: String,
}

impl CurrentUser {
    pub(crate) fn from_context(ctx: &SessionContext) -> Option<Self> {
        let user = ctx.user.as_ref()?;
        Some(Self {
            id: user.id,
            email: user.email.clone(),
            access_token: ctx.access_token.clone().unwrap_or_default(),
        })
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<SessionContext>()
            .and_then(CurrentUser::from_context);
        ready(user.ok_or_else(AppError::unauthorized))
    }
}

/// The caller if signed in; never rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalUser(pub Option<CurrentUser>);

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<SessionContext>()
            .and_then(CurrentUser::from_context);
        ready(Ok(OptionalUser(user)))
    }
}

/// The response-cookie accumulator installed by the session middleware.
impl FromRequest for ResponseCookies {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let jar = req.extensions().get::<ResponseCookies>().cloned();
        ready(jar.ok_or_else(|| AppError::internal("response cookie jar not installed")))
    }
}
