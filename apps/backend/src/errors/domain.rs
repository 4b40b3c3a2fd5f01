//! Domain errors shared by repos and services.
//!
//! Handlers return `AppError`; the `From<DomainError>` impl in `crate::error`
//! picks the status and code.

use thiserror::Error;

/// Operational failures, kept apart so 503 and 500 can be told apart
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Which resource was missing; drives the `*_NOT_FOUND` code
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Confession,
    Group,
    User,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    UniqueName,
    Other(String),
}

/// What repos and services return. No HTTP or SQL detail leaks through.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Bad input or a broken business rule
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Caller is not allowed to touch the resource
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Query failure whose message is part of the endpoint contract
    #[error("query failed: {0}")]
    Query(String),
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden(detail.into())
    }
    pub fn query(detail: impl Into<String>) -> Self {
        Self::Query(detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}
