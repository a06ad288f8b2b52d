//! Database access layer

pub mod entries;
pub mod seed;
pub mod users;
