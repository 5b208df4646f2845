//! Shared configuration, error taxonomy, and domain types for the relay.

pub mod config;
pub mod error;
pub mod types;
