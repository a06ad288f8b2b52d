//! Authentication and authorization
//!
//! [`jwt`] turns a bearer token into a verified [`jwt::AuthUser`];
//! [`policy`] decides what that user may do. The two are deliberately
//! separate: the policy never sees a token, only an identity.

pub mod jwt;
pub mod policy;
pub mod rate_limit;

pub use jwt::AuthUser;
