use tracing::{info, warn};

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A state-changing request failed the CSRF double-submit check.
pub fn csrf_rejected(path: &str, reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_CSRF_REJECTED",
        %trace_id,
        path,
        reason,
        "CSRF check failed"
    );
}

/// A non-admin caller reached an admin-only route.
pub fn admin_denied(user_id: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ADMIN_DENIED",
        %trace_id,
        user_id,
        email = %email.map(Redacted).unwrap_or(Redacted("")),
        "Admin access denied"
    );
}

/// The auth service rejected or failed a session validation/refresh.
pub fn session_refresh_failed(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SESSION_REFRESH_FAILED",
        %trace_id,
        reason = %Redacted(reason),
        "Session refresh failed; continuing unauthenticated"
    );
}

/// The external OAuth callback presented a `state` that does not match.
pub fn oauth_state_mismatch() {
    let trace_id = trace_ctx::trace_id();

    warn!(event = "SECURITY_OAUTH_STATE_MISMATCH", %trace_id, "OAuth state mismatch");
}

/// A session was established or destroyed.
pub fn session_event(event: &'static str, user_id: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    info!(event, %trace_id, user_id = user_id.unwrap_or("-"), "session event");
}
