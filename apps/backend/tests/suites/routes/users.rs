use actix_web::test;
use backend::entities::user_levels;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use uuid::Uuid;

use crate::common::{assert_error, read_json};
use crate::support::fixtures::{at, count_row};
use crate::support::{create_test_app, FakeAuth};

#[actix_web::test]
async fn missing_level_row_is_a_500_with_its_message() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user_levels::Model>::new()])
        .into_connection();
    let app = create_test_app(FakeAuth::succeeding())
        .with_db(db)
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/level", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body = assert_error(resp, 500, "QUERY_ERROR").await;
    assert_eq!(body.error, "No level record found for user");
}

#[actix_web::test]
async fn level_is_returned_when_present() {
    let user_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_levels::Model {
            user_id,
            level: 3,
            experience: 250,
            updated_at: at(),
        }]])
        .into_connection();
    let app = create_test_app(FakeAuth::succeeding())
        .with_db(db)
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{user_id}/level"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body = read_json(resp).await;
    assert_eq!(body["level"]["level"], 3);
    assert_eq!(body["level"]["experience"], 250);
}

#[actix_web::test]
async fn stats_aggregate_four_counts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![count_row(7)],
            vec![count_row(2)],
            vec![count_row(1)],
            vec![count_row(4)],
        ])
        .into_connection();
    let app = create_test_app(FakeAuth::succeeding())
        .with_db(db)
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/stats", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let stats = &read_json(resp).await["stats"];
    let total: u64 = ["confessions", "achievements", "groups", "mentions"]
        .iter()
        .map(|k| stats[*k].as_u64().expect("numeric count"))
        .sum();
    assert_eq!(total, 14);
}

#[actix_web::test]
async fn malformed_user_id_is_400() {
    let app = create_test_app(FakeAuth::succeeding()).build().await;

    let req = test::TestRequest::get()
        .uri("/api/users/not-a-uuid/stats")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error(resp, 400, "INVALID_ID").await;
}

#[actix_web::test]
async fn search_requires_a_query() {
    let app = create_test_app(FakeAuth::succeeding()).build().await;

    for uri in ["/api/users/search", "/api/users/search?q=%20%20"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let body = assert_error(resp, 400, "MISSING_FIELD").await;
        assert_eq!(body.error, "q is required");
    }
}

#[actix_web::test]
async fn search_failure_renders_an_empty_list() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("statement timeout".into())])
        .into_connection();
    let app = create_test_app(FakeAuth::succeeding())
        .with_db(db)
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/api/users/search?q=ali")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await, serde_json::json!({ "users": [] }));
}
