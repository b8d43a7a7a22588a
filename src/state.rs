use std::sync::Arc;

use shule_config::{AdmissionConfig, CorsConfig, JwtConfig, RateLimitConfig};
use shule_core::{AppError, hash_password};
use sqlx::SqlitePool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub admission_config: AdmissionConfig,
    /// bcrypt hash of `admission_config.default_parent_password`, given to
    /// every student created by approval.
    pub parent_password_hash: Arc<str>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
        admission_config: AdmissionConfig,
    ) -> Result<Self, AppError> {
        let parent_password_hash = hash_password(&admission_config.default_parent_password)?;

        Ok(Self {
            db,
            jwt_config,
            cors_config,
            rate_limit_config,
            admission_config,
            parent_password_hash: Arc::from(parent_password_hash),
        })
    }

    pub fn from_env(db: SqlitePool) -> Result<Self, AppError> {
        Self::new(
            db,
            JwtConfig::from_env(),
            CorsConfig::from_env(),
            RateLimitConfig::from_env(),
            AdmissionConfig::from_env(),
        )
    }
}
