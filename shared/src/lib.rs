//! Shared types for the profit/loss portal
//!
//! Holds the unified error system ([`error`]) and the closed domain
//! enums ([`models`]) used by both the API layer and the database layer.

pub mod error;
pub mod models;
