pub mod cookie_propagation;
pub mod exclusions;
