use std::sync::Arc;

use actix_web::test;
use backend::auth::AuthUser;
use backend::entities::{admin_logs, roles};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};
use serde_json::json;
use uuid::Uuid;

use crate::common::{assert_error, read_json};
use crate::support::fake_auth::Behavior;
use crate::support::fixtures::profile;
use crate::support::requests::{signed_in, with_csrf};
use crate::support::{create_test_app, transaction_log, FakeAuth};

fn user_with_email(email: &str) -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        email: Some(email.to_string()),
        role: Some("authenticated".to_string()),
    }
}

fn no_logs() -> Vec<admin_logs::Model> {
    Vec::new()
}

#[actix_web::test]
async fn anonymous_caller_is_401() {
    let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let app = create_test_app(FakeAuth::succeeding())
        .with_db(db.clone())
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/admin/logs").to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 401, "UNAUTHORIZED").await;
    drop(app);
    assert!(transaction_log(db).is_empty());
}

#[actix_web::test]
async fn member_without_flag_or_domain_is_403() {
    let auth = FakeAuth::succeeding();
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![profile(auth.user.id, false, "member@example.com")]])
            .into_connection(),
    );
    let app = create_test_app(auth).with_db(db.clone()).build().await;

    let req = signed_in(test::TestRequest::get().uri("/api/admin/logs")).to_request();
    let resp = test::call_service(&app, req).await;

    let body = assert_error(resp, 403, "ADMIN_REQUIRED").await;
    assert_eq!(body.error, "Admin access required");
    drop(app);
    assert_eq!(transaction_log(db).len(), 1, "handler body must not run");
}

#[actix_web::test]
async fn profile_flag_grants_access() {
    let auth = FakeAuth::succeeding();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(auth.user.id, true, "member@example.com")]])
        .append_query_results([no_logs()])
        .into_connection();
    let app = create_test_app(auth).with_db(db).build().await;

    let req = signed_in(test::TestRequest::get().uri("/api/admin/logs")).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await, json!({ "logs": [] }));
}

#[actix_web::test]
async fn admin_email_domain_is_the_fallback() {
    let auth = FakeAuth::for_user(user_with_email("Root@Admin.com"), Behavior::Succeed);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(auth.user.id, false, "root@admin.com")]])
        .append_query_results([no_logs()])
        .into_connection();
    let app = create_test_app(auth).with_db(db).build().await;

    let req = signed_in(test::TestRequest::get().uri("/api/admin/logs")).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn lookalike_domain_is_not_admin() {
    let auth = FakeAuth::for_user(user_with_email("root@admin.com.evil"), Behavior::Succeed);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(auth.user.id, false, "root@admin.com.evil")]])
        .into_connection();
    let app = create_test_app(auth).with_db(db).build().await;

    let req = signed_in(test::TestRequest::get().uri("/api/admin/roles")).to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 403, "ADMIN_REQUIRED").await;
}

#[actix_web::test]
async fn creating_a_role_is_audited() {
    let auth = FakeAuth::succeeding();
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![profile(auth.user.id, true, "member@example.com")]])
            .append_query_results([vec![roles::Model {
                id: 7,
                name: "moderator".to_string(),
                description: None,
            }]])
            .append_exec_results([MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .into_connection(),
    );
    let app = create_test_app(auth).with_db(db.clone()).build().await;

    let req = with_csrf(signed_in(test::TestRequest::post().uri("/api/admin/roles")))
        .set_json(json!({ "name": " moderator " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 201);
    let body = read_json(resp).await;
    assert_eq!(body["role"]["name"], "moderator");

    drop(app);
    let log = format!("{:?}", transaction_log(db));
    assert!(log.contains("admin_logs"), "audit row written: {log}");
}

#[actix_web::test]
async fn duplicate_role_name_is_409() {
    let auth = FakeAuth::succeeding();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(auth.user.id, true, "member@example.com")]])
        .append_query_errors([DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"roles_name_key\"".to_string(),
        ))])
        .into_connection();
    let app = create_test_app(auth).with_db(db).build().await;

    let req = with_csrf(signed_in(test::TestRequest::post().uri("/api/admin/roles")))
        .set_json(json!({ "name": "moderator" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body = assert_error(resp, 409, "UNIQUE_VIOLATION").await;
    assert_eq!(body.error, "Role name already exists");
}

#[actix_web::test]
async fn empty_user_update_is_400() {
    let auth = FakeAuth::succeeding();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![profile(auth.user.id, true, "member@example.com")]])
        .into_connection();
    let app = create_test_app(auth).with_db(db).build().await;

    let req = with_csrf(signed_in(
        test::TestRequest::patch().uri(&format!("/api/admin/users/{}", Uuid::new_v4())),
    ))
    .set_json(json!({}))
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 400, "VALIDATION_ERROR").await;
}

#[actix_web::test]
async fn cache_endpoints_without_a_cache() {
    let auth = FakeAuth::succeeding();
    let admin = profile(auth.user.id, true, "member@example.com");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin.clone()], vec![admin]])
        .into_connection();
    let app = create_test_app(auth).with_db(db).build().await;

    let req = signed_in(test::TestRequest::get().uri("/api/admin/cache")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await, json!({ "connected": false }));

    let req = with_csrf(signed_in(test::TestRequest::delete().uri("/api/admin/cache")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error(resp, 503, "CACHE_UNAVAILABLE").await;
}

#[actix_web::test]
async fn rejected_access_token_is_401_on_admin_routes() {
    let app = create_test_app(FakeAuth::new(Behavior::Reject)).build().await;

    let req = signed_in(test::TestRequest::get().uri("/api/admin/settings")).to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 401, "UNAUTHORIZED").await;
}
