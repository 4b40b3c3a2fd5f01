//! Repository functions: domain types over the SeaORM adapters.

pub mod admin;
pub mod catalog;
pub mod confessions;
pub mod groups;
pub mod mentions;
pub mod profiles;
pub mod progress;
