//! SeaORM adapters. Functions return `DbErr`; the repos layer maps them to
//! `DomainError`.

pub mod admin_sea;
pub mod catalog_sea;
pub mod confessions_sea;
pub mod groups_sea;
pub mod mentions_sea;
pub mod profiles_sea;
pub mod progress_sea;
