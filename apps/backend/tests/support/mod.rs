#![allow(dead_code)]

pub mod app_builder;
pub mod fake_auth;
pub mod fixtures;
pub mod requests;
pub mod tokens;

pub use app_builder::{create_test_app, transaction_log};
pub use fake_auth::FakeAuth;
