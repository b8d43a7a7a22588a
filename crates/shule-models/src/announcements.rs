//! School announcements, optionally targeted at one level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shule_core::{AppError, PaginationMeta, PaginationParams};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::levels::EducationLevel;
use crate::validation::not_blank;

pub const TARGET_ALL: &str = "All";
pub const TYPE_GENERAL: &str = "general";
pub const TYPE_RESULTS: &str = "results";

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub attachment: Option<String>,
    pub date_posted: DateTime<Utc>,
    /// `All` or a level code
    pub target_level: String,
    #[schema(example = "general")]
    pub announcement_type: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAnnouncementDto {
    #[validate(
        custom(function = "not_blank", message = "title is required"),
        length(max = 200, message = "title must be at most 200 characters")
    )]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "content is required"))]
    pub content: String,
    #[validate(length(max = 200, message = "attachment must be at most 200 characters"))]
    pub attachment: Option<String>,
    /// `All` (default) or a level code or alias
    pub target_level: Option<String>,
    #[validate(length(min = 1, max = 30, message = "announcement_type must be 1-30 characters"))]
    pub announcement_type: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct AnnouncementFilterParams {
    pub announcement_type: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedAnnouncementsResponse {
    pub data: Vec<Announcement>,
    pub meta: PaginationMeta,
}

/// Maps a requested audience to its stored form: `All` or a level code.
pub fn normalize_target_level(target: Option<&str>) -> Result<String, AppError> {
    match target.map(str::trim) {
        None | Some("") => Ok(TARGET_ALL.to_string()),
        Some(t) if t.eq_ignore_ascii_case(TARGET_ALL) => Ok(TARGET_ALL.to_string()),
        Some(t) => Ok(t.parse::<EducationLevel>()?.as_str().to_string()),
    }
}
