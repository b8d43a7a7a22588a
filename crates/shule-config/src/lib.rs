//! # Shule Config
//!
//! Configuration structures loaded from environment variables. Each has a
//! `from_env()` constructor that falls back to development defaults.
//!
//! - [`admissions`]: school name, parent PIN, fee and payment channel table
//! - [`cors`]: allowed origins
//! - [`database`]: SQLite URL and pool size
//! - [`jwt`]: token secret and lifetime
//! - [`rate_limit`]: quotas for public endpoints

pub mod admissions;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;

pub use admissions::{AdmissionConfig, PaymentChannel};
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;

/// Reads and parses an env var, falling back to `default` when unset or invalid.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
