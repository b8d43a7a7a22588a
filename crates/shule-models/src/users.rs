//! Staff accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shule_core::Role;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum StaffRole {
    Secretary,
    Headmaster,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Secretary => "secretary",
            StaffRole::Headmaster => "headmaster",
        }
    }
}

impl From<StaffRole> for Role {
    fn from(role: StaffRole) -> Self {
        match role {
            StaffRole::Secretary => Role::Secretary,
            StaffRole::Headmaster => Role::Headmaster,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: StaffRole,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStaffDto {
    #[validate(
        custom(function = "not_blank", message = "username is required"),
        length(max = 80, message = "username must be at most 80 characters")
    )]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 4, message = "password must be at least 4 characters"))]
    pub password: String,
    pub role: StaffRole,
}
