use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use backend::config::RuntimeEnv;

const DEFAULT_FILTER: &str = "info,backend=info,actix_web=info,sqlx=warn,sea_orm=warn,redis=warn";

/// JSON lines in production; `LOG_FORMAT=json` forces them elsewhere.
pub fn init_tracing(env: RuntimeEnv) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = env.is_production()
        || std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .with_ansi(false),
            )
            .init();
    } else {
        registry.with(fmt::layer().compact().with_target(true)).init();
    }
}
