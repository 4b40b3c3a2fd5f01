use actix_web::test;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

use crate::common::read_json;
use crate::support::fixtures::category;
use crate::support::{create_test_app, FakeAuth};

#[actix_web::test]
async fn categories_are_listed_from_the_database() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![category(1, "Love"), category(2, "Work")]])
        .into_connection();
    let app = create_test_app(FakeAuth::succeeding())
        .with_db(db)
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body = read_json(resp).await;
    let names: Vec<&str> = body["categories"]
        .as_array()
        .expect("categories array")
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert_eq!(names, ["Love", "Work"]);
}

#[actix_web::test]
async fn query_failure_renders_an_empty_list() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("relation \"categories\" does not exist".into())])
        .into_connection();
    let app = create_test_app(FakeAuth::succeeding())
        .with_db(db)
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await, serde_json::json!({ "categories": [] }));
}

#[actix_web::test]
async fn missing_database_also_renders_an_empty_list() {
    let app = create_test_app(FakeAuth::succeeding()).build().await;

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await["categories"], serde_json::json!([]));
}
