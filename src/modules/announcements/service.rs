use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use shule_core::{Action, AppError, AuthContext, PaginationParams};
use shule_models::EducationLevel;

use crate::modules::announcements::model::{
    Announcement, AnnouncementFilterParams, CreateAnnouncementDto, PaginatedAnnouncementsResponse,
    TARGET_ALL, TYPE_GENERAL, TYPE_RESULTS, normalize_target_level,
};

const ANNOUNCEMENT_COLUMNS: &str =
    "id, title, content, attachment, date_posted, target_level, announcement_type";

pub struct AnnouncementService;

impl AnnouncementService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &SqlitePool,
        ctx: &AuthContext,
        dto: CreateAnnouncementDto,
    ) -> Result<Announcement, AppError> {
        ctx.authorize(Action::CreateAnnouncement)?;

        let target_level = normalize_target_level(dto.target_level.as_deref())?;
        let announcement_type = dto
            .announcement_type
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| TYPE_GENERAL.to_string());
        let attachment = dto
            .attachment
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty());

        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            r#"INSERT INTO announcements
                   (title, content, attachment, date_posted, target_level, announcement_type)
               VALUES (?, ?, ?, ?, ?, ?)
               RETURNING {ANNOUNCEMENT_COLUMNS}"#
        ))
        .bind(dto.title.trim())
        .bind(dto.content.trim())
        .bind(attachment)
        .bind(Utc::now())
        .bind(&target_level)
        .bind(&announcement_type)
        .fetch_one(db)
        .await?;

        info!(
            announcement_id = announcement.id,
            target_level = %announcement.target_level,
            announcement_type = %announcement.announcement_type,
            posted_by = %ctx.role(),
            "announcement posted"
        );

        Ok(announcement)
    }

    /// Newest first, optionally narrowed to one announcement type.
    #[instrument(skip(db))]
    pub async fn list(
        db: &SqlitePool,
        ctx: &AuthContext,
        filters: AnnouncementFilterParams,
    ) -> Result<PaginatedAnnouncementsResponse, AppError> {
        ctx.authorize(Action::ListAnnouncements)?;

        let announcement_type = filters
            .announcement_type
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());
        Self::list_by_type(db, announcement_type, &filters.pagination).await
    }

    /// Announcements of type `results`, newest first.
    #[instrument(skip(db))]
    pub async fn results(
        db: &SqlitePool,
        ctx: &AuthContext,
        pagination: PaginationParams,
    ) -> Result<PaginatedAnnouncementsResponse, AppError> {
        ctx.authorize(Action::ListAnnouncements)?;
        Self::list_by_type(db, Some(TYPE_RESULTS.to_string()), &pagination).await
    }

    /// The newest `limit` announcements addressed to everyone or to `level`.
    pub async fn latest_for_level(
        db: &SqlitePool,
        level: EducationLevel,
        limit: i64,
    ) -> Result<Vec<Announcement>, AppError> {
        let announcements = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements \
             WHERE target_level IN (?, ?) \
             ORDER BY date_posted DESC, id DESC LIMIT ?"
        ))
        .bind(TARGET_ALL)
        .bind(level.as_str())
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(announcements)
    }

    async fn list_by_type(
        db: &SqlitePool,
        announcement_type: Option<String>,
        pagination: &PaginationParams,
    ) -> Result<PaginatedAnnouncementsResponse, AppError> {
        let limit = pagination.limit();
        let offset = pagination.offset();
        let where_clause = if announcement_type.is_some() {
            " WHERE announcement_type = ?"
        } else {
            ""
        };

        let count_query = format!("SELECT COUNT(*) FROM announcements{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(announcement_type) = &announcement_type {
            count_sql = count_sql.bind(announcement_type);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements{where_clause} \
             ORDER BY date_posted DESC, id DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Announcement>(&data_query);
        if let Some(announcement_type) = &announcement_type {
            data_sql = data_sql.bind(announcement_type);
        }
        let announcements = data_sql.fetch_all(db).await?;

        Ok(PaginatedAnnouncementsResponse {
            data: announcements,
            meta: pagination.meta(total),
        })
    }
}
