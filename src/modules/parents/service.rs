use anyhow::anyhow;
use sqlx::SqlitePool;
use tracing::instrument;

use shule_core::{Action, AppError, AuthContext};

use crate::modules::announcements::service::AnnouncementService;
use crate::modules::messages::service::MessageService;
use crate::modules::parents::model::ParentDashboard;
use crate::modules::students::service::StudentService;

/// Announcements shown on the parent dashboard.
pub const DASHBOARD_ANNOUNCEMENTS: i64 = 5;

pub struct ParentService;

impl ParentService {
    #[instrument(skip(db))]
    pub async fn dashboard(
        db: &SqlitePool,
        ctx: &AuthContext,
    ) -> Result<ParentDashboard, AppError> {
        ctx.authorize(Action::ViewParentDashboard)?;

        let registration_number = ctx
            .subject()
            .ok_or_else(|| AppError::unauthorized(anyhow!("Parent session has no student")))?;

        let student = StudentService::get_by_registration_number(db, registration_number).await?;
        let announcements =
            AnnouncementService::latest_for_level(db, student.level, DASHBOARD_ANNOUNCEMENTS)
                .await?;
        let messages = MessageService::for_student(db, &student.registration_number).await?;

        Ok(ParentDashboard {
            student,
            announcements,
            messages,
        })
    }
}
