//! Infrastructure layer - database, cache, state assembly and DB error mapping.

pub mod cache;
pub mod db;
pub mod db_errors;
pub mod state;
