//! Command implementations.

pub mod config;
pub mod generate;
pub mod types;
