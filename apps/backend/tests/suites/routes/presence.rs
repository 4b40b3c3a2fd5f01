use std::sync::Arc;

use actix_web::test;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::json;

use crate::common::{assert_error, read_json};
use crate::support::requests::{signed_in, with_csrf};
use crate::support::{create_test_app, transaction_log, FakeAuth};

fn status_request(status: &str) -> actix_http::Request {
    with_csrf(signed_in(test::TestRequest::post().uri("/api/update-status")))
        .set_json(json!({ "status": status }))
        .to_request()
}

#[actix_web::test]
async fn unknown_status_is_rejected_before_writing() {
    let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let app = create_test_app(FakeAuth::succeeding())
        .with_db(db.clone())
        .build()
        .await;

    let resp = test::call_service(&app, status_request("busy")).await;

    assert_error(resp, 400, "INVALID_STATUS").await;
    drop(app);
    assert!(transaction_log(db).is_empty());
}

#[actix_web::test]
async fn valid_status_is_stored() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = create_test_app(FakeAuth::succeeding())
        .with_db(db)
        .build()
        .await;

    let resp = test::call_service(&app, status_request("away")).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(
        read_json(resp).await,
        json!({ "success": true, "status": "away" })
    );
}
