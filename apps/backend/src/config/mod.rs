//! Environment-driven configuration.

pub mod auth_service;
pub mod db;
pub mod env;
pub mod identity_provider;

pub use auth_service::AuthServiceConfig;
pub use env::RuntimeEnv;
pub use identity_provider::IdentityProviderConfig;
