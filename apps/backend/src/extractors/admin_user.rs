//! The admin gate. Every `/api/admin/*` handler takes an [`AdminUser`], so
//! the admin rule lives here and nowhere else.

use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use tracing::debug;

use super::session::CurrentUser;
use crate::auth::policy::{admin_grant, AdminGrant};
use crate::auth::SessionContext;
use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::profiles;
use crate::state::app_state::AppState;

#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user: CurrentUser,
    pub grant: AdminGrant,
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<SessionContext>()
            .and_then(CurrentUser::from_context)
            .ok_or_else(AppError::unauthorized);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let user = user?;
            let state = state.ok_or_else(|| AppError::internal("AppState not available"))?;

            let profile_flag = profiles::admin_flag(require_db(&state)?, user.id).await?;

            match admin_grant(
                profile_flag,
                user.email.as_deref(),
                &state.security.admin_email_domain,
            ) {
                Some(grant) => {
                    debug!(user_id = %user.id, ?grant, "admin access granted");
                    Ok(AdminUser { user, grant })
                }
                None => {
                    security::admin_denied(&user.id.to_string(), user.email.as_deref());
                    Err(AppError::forbidden(
                        ErrorCode::AdminRequired,
                        "Admin access required",
                    ))
                }
            }
        })
    }
}
