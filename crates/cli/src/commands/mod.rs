//! CLI command implementations.

pub mod edit;
pub mod list;
pub mod random;
