//! Shared helpers for backend tests: one-time log setup and assertions on
//! the JSON error body. Kept free of `backend` types so both unit and
//! integration tests can depend on it.

pub mod error_body;
pub mod logging;
