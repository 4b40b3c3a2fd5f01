pub mod cors;
pub mod csrf_guard;
pub mod rate_limit;
pub mod request_trace;
pub mod security_headers;
pub mod session_refresh;
pub mod structured_logger;
pub mod trace_span;

pub use cors::cors_middleware;
pub use csrf_guard::CsrfGuard;
pub use request_trace::RequestTrace;
pub use security_headers::SecurityHeaders;
pub use session_refresh::SessionRefresh;
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
