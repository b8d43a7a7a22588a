use anyhow::anyhow;
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use shule_auth::create_access_token;
use shule_config::JwtConfig;
use shule_core::{AppError, Role, verify_password};
use shule_models::User;

use crate::metrics::track_login;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, ParentLoginRequest, ParentLoginResponse,
};
use crate::modules::students::service::StudentService;

const TOKEN_TYPE: &str = "Bearer";

fn invalid_credentials() -> AppError {
    AppError::unauthorized(anyhow!("Invalid credentials"))
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, jwt_config, dto), fields(username = %dto.username))]
    pub async fn login_staff(
        db: &SqlitePool,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role, email, created_at FROM users WHERE username = ?",
        )
        .bind(dto.username.trim())
        .fetch_optional(db)
        .await?;

        let Some(user) = user.filter(|u| verify_password(&dto.password, &u.password_hash)) else {
            warn!("staff login failed");
            track_login("staff", false);
            return Err(invalid_credentials());
        };

        let role = Role::from(user.role);
        let access_token = create_access_token(&user.id.to_string(), role, jwt_config)?;

        info!(user_id = user.id, role = %role, "staff logged in");
        track_login(role.as_str(), true);

        Ok(LoginResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            user,
        })
    }

    /// Parents authenticate with the registration number and the PIN set at
    /// approval time.
    #[instrument(skip(db, jwt_config, dto), fields(registration_number = %dto.registration_number))]
    pub async fn login_parent(
        db: &SqlitePool,
        jwt_config: &JwtConfig,
        dto: ParentLoginRequest,
    ) -> Result<ParentLoginResponse, AppError> {
        let registration_number = dto.registration_number.trim().to_uppercase();
        let student = StudentService::find_by_registration_number(db, &registration_number).await?;

        let Some(student) = student.filter(|s| verify_password(&dto.password, &s.password)) else {
            warn!("parent login failed");
            track_login(Role::Parent.as_str(), false);
            return Err(invalid_credentials());
        };

        let access_token =
            create_access_token(&student.registration_number, Role::Parent, jwt_config)?;

        info!(student_id = student.id, "parent logged in");
        track_login(Role::Parent.as_str(), true);

        Ok(ParentLoginResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            student,
        })
    }
}
