//! Command implementations

pub mod build;
pub mod summary;
