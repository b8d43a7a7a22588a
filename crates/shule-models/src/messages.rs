//! Messages addressed to one student's parents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shule_core::PaginationMeta;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::not_blank;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StudentMessage {
    pub id: i64,
    pub student_registration: String,
    pub title: String,
    pub message: String,
    pub attachment: Option<String>,
    pub date_sent: DateTime<Utc>,
    pub sender_role: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SendMessageDto {
    #[validate(custom(function = "not_blank", message = "student_registration is required"))]
    #[schema(example = "24PL003")]
    pub student_registration: String,
    #[validate(
        custom(function = "not_blank", message = "title is required"),
        length(max = 200, message = "title must be at most 200 characters")
    )]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "message is required"))]
    pub message: String,
    #[validate(length(max = 200, message = "attachment must be at most 200 characters"))]
    pub attachment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedMessagesResponse {
    pub data: Vec<StudentMessage>,
    pub meta: PaginationMeta,
}
