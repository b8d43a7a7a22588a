//! Request extractors and middleware.
//!
//! - [`auth`]: resolves the bearer token (if any) into an [`AuthContext`](shule_core::AuthContext)
//! - [`rate_limit`]: per-client quotas for public endpoints

pub mod auth;
pub mod rate_limit;
