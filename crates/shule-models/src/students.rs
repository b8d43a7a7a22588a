//! Students provisioned by approving an application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shule_core::{PaginationMeta, PaginationParams};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::levels::EducationLevel;

pub const ACTIVE_STATUS: &str = "Active";

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    pub birth_date: String,
    pub address: String,
    pub level: EducationLevel,
    #[schema(example = "24PL003")]
    pub registration_number: String,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_email: String,
    pub date_registered: DateTime<Utc>,
    /// bcrypt hash of the parent login PIN
    #[serde(skip)]
    pub password: String,
    pub status: String,
    pub application_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct StudentFilterParams {
    pub level: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}
