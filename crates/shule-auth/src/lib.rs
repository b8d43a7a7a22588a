//! # Shule Auth
//!
//! Bearer tokens for staff and parents.
//!
//! - [`claims`]: the [`Claims`] carried in every access token
//! - [`jwt`]: token creation and verification

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
