//! Rate limits for the unauthenticated endpoints.
//!
//! - `RATE_LIMIT_GENERAL_PER_SECOND` / `RATE_LIMIT_GENERAL_BURST_SIZE`:
//!   application submission and payment confirmation (default 2/s, burst 30)
//! - `RATE_LIMIT_AUTH_PER_SECOND` / `RATE_LIMIT_AUTH_BURST_SIZE`:
//!   staff and parent login (default 1/s, burst 5)
//! - `RATE_LIMIT_TRUST_FORWARDED_FOR`: key clients by the first
//!   `X-Forwarded-For` address instead of the peer address. Only enable this
//!   behind a reverse proxy that overwrites the header (default false)
//!
//! Values of zero are bumped to one since governor quotas cannot be empty.

use std::num::NonZeroU32;

use governor::Quota;

use crate::env_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub general_per_second: u32,
    pub general_burst_size: u32,
    pub auth_per_second: u32,
    pub auth_burst_size: u32,
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_per_second: 2,
            general_burst_size: 30,
            auth_per_second: 1,
            auth_burst_size: 5,
            trust_forwarded_for: false,
        }
    }
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            general_per_second: env_or("RATE_LIMIT_GENERAL_PER_SECOND", defaults.general_per_second),
            general_burst_size: env_or("RATE_LIMIT_GENERAL_BURST_SIZE", defaults.general_burst_size),
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
            trust_forwarded_for: env_or(
                "RATE_LIMIT_TRUST_FORWARDED_FOR",
                defaults.trust_forwarded_for,
            ),
        }
    }

    #[must_use]
    pub fn general_quota(&self) -> Quota {
        Quota::per_second(non_zero(self.general_per_second))
            .allow_burst(non_zero(self.general_burst_size))
    }

    #[must_use]
    pub fn auth_quota(&self) -> Quota {
        Quota::per_second(non_zero(self.auth_per_second))
            .allow_burst(non_zero(self.auth_burst_size))
    }
}
