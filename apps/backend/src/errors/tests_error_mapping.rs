// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use sea_orm::{DbErr, RuntimeErr};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::AppError;

#[test]
fn maps_not_found_kinds_to_codes() {
    let cases = [
        (NotFoundKind::Confession, ErrorCode::ConfessionNotFound),
        (NotFoundKind::Group, ErrorCode::GroupNotFound),
        (NotFoundKind::User, ErrorCode::UserNotFound),
        (NotFoundKind::Other("Record".into()), ErrorCode::NotFound),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::not_found(kind, "missing").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 404);
        assert_eq!(app.message(), "missing");
    }
}

#[test]
fn maps_conflicts() {
    let unique = DomainError::conflict(ConflictKind::UniqueName, "Role name already exists");
    let app: AppError = unique.into();
    assert_eq!(app.code().as_str(), "UNIQUE_VIOLATION");
    assert_eq!(app.status().as_u16(), 409);

    // Generic conflict fallback
    let other = DomainError::conflict(ConflictKind::Other("AlreadyMember".into()), "member");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::Conflict);
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn validation_is_400() {
    let app: AppError = DomainError::validation("Content cannot be empty").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 400);
    assert_eq!(app.message(), "Content cannot be empty");
}

#[test]
fn data_corruption_hides_detail() {
    let app: AppError =
        DomainError::infra(InfraErrorKind::DataCorruption, "row 17 has bad json").into();
    assert_eq!(app.status().as_u16(), 500);
    assert_eq!(app.message(), "Internal server error");
}

#[test]
fn db_errors_flow_through_domain_mapping() {
    let app: AppError = DbErr::Exec(RuntimeErr::Internal(
        "duplicate key value violates unique constraint \"roles_name_key\"".into(),
    ))
    .into();
    assert_eq!(app.code(), ErrorCode::UniqueViolation);
    assert_eq!(app.message(), "Role name already exists");

    let app: AppError = DbErr::Custom("connection reset by peer".into()).into();
    assert_eq!(app.status().as_u16(), 500);
    assert_eq!(app.message(), "Database operation failed");
}
