use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::auth::AuthClient;
use backend::config::IdentityProviderConfig;
use backend::infra::state::build_state;
use backend::middleware::{
    RequestTrace, SecurityHeaders, SessionRefresh, StructuredLogger, TraceSpan,
};
use backend::routes;
use backend::state::app_state::AppState;
use sea_orm::{DatabaseConnection, Transaction};

/// Builder for a test service wired with the production middleware stack
/// (minus CORS and rate limiting) and the production routes.
pub struct TestAppBuilder {
    auth: Arc<dyn AuthClient>,
    db: Option<Arc<DatabaseConnection>>,
    idp: Option<IdentityProviderConfig>,
}

impl TestAppBuilder {
    pub fn new(auth: Arc<dyn AuthClient>) -> Self {
        Self {
            auth,
            db: None,
            idp: None,
        }
    }

    pub fn with_idp(mut self, idp: IdentityProviderConfig) -> Self {
        self.idp = Some(idp);
        self
    }

    /// Use a SeaORM mock connection as the database. Pass an `Arc` and keep
    /// a clone to read the transaction log with [`transaction_log`].
    pub fn with_db(mut self, db: impl Into<Arc<DatabaseConnection>>) -> Self {
        self.db = Some(db.into());
        self
    }

    pub async fn state(self) -> AppState {
        let mut builder = build_state().with_auth(self.auth).with_idp(self.idp);
        if let Some(db) = self.db {
            builder = builder.with_existing_db(db);
        }
        builder.build().await.expect("test state should build")
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
        let data = web::Data::new(self.state().await);

        test::init_service(
            App::new()
                .wrap(SecurityHeaders)
                .wrap(StructuredLogger)
                .wrap(SessionRefresh)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(routes::configure),
        )
        .await
    }
}

pub fn create_test_app(auth: Arc<dyn AuthClient>) -> TestAppBuilder {
    TestAppBuilder::new(auth)
}

/// Drain the mock transaction log. The app (and every response taken from
/// it) must be dropped first so this is the last handle.
pub fn transaction_log(db: Arc<DatabaseConnection>) -> Vec<Transaction> {
    match Arc::try_unwrap(db) {
        Ok(conn) => conn.into_transaction_log(),
        Err(_) => panic!("test app still holds the database connection"),
    }
}
