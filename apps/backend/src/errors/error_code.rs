//! Error codes for the confessions backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the `code` field of
//! error responses.

use core::fmt;

/// Centralized error codes surfaced in JSON error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Access denied
    Forbidden,
    /// Caller is not an administrator
    AdminRequired,
    /// Caller does not own the row being changed
    NotOwner,
    /// CSRF cookie/header missing or mismatched
    CsrfMismatch,
    /// OAuth `state` did not match the stored value
    InvalidOauthState,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Required field missing from body or query
    MissingField,
    /// Malformed id in path or body
    InvalidId,
    /// Unknown presence status
    InvalidStatus,

    // Resource Not Found
    /// Confession not found
    ConfessionNotFound,
    /// Interest group not found
    GroupNotFound,
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Unique constraint (e.g. role name) already taken
    UniqueViolation,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Database query failed and the message is surfaced
    QueryError,
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Cache unavailable or not configured
    CacheUnavailable,
    /// Upstream auth service failed
    AuthUpstream,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Stored data could not be decoded
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::NotOwner => "NOT_OWNER",
            Self::CsrfMismatch => "CSRF_MISMATCH",
            Self::InvalidOauthState => "INVALID_OAUTH_STATE",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::MissingField => "MISSING_FIELD",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidStatus => "INVALID_STATUS",

            Self::ConfessionNotFound => "CONFESSION_NOT_FOUND",
            Self::GroupNotFound => "GROUP_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::QueryError => "QUERY_ERROR",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::CacheUnavailable => "CACHE_UNAVAILABLE",
            Self::AuthUpstream => "AUTH_UPSTREAM",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
