//! Domain services: rules that sit between handlers and repos.

pub mod admin_audit;
pub mod catalog;
pub mod confessions;
pub mod user_stats;
