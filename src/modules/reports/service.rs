use sqlx::SqlitePool;
use tracing::instrument;

use shule_core::{Action, AppError, AuthContext};

use crate::modules::reports::model::{HeadmasterDashboard, SecretaryReport};

/// Student total, application total, then one count per status.
type Counts = (i64, i64, i64, i64, i64, i64);

pub struct ReportService;

impl ReportService {
    #[instrument(skip(db))]
    pub async fn secretary_report(
        db: &SqlitePool,
        ctx: &AuthContext,
    ) -> Result<SecretaryReport, AppError> {
        ctx.authorize(Action::ViewReports)?;

        let (total_students, total_applications, pending, completed, approved, rejected) =
            Self::counts(db).await?;

        Ok(SecretaryReport {
            total_students,
            total_applications,
            pending,
            completed,
            approved,
            rejected,
        })
    }

    #[instrument(skip(db))]
    pub async fn headmaster_dashboard(
        db: &SqlitePool,
        ctx: &AuthContext,
    ) -> Result<HeadmasterDashboard, AppError> {
        ctx.authorize(Action::ViewHeadmasterDashboard)?;

        let (total_students, total_applications, pending, completed, _, _) =
            Self::counts(db).await?;

        Ok(HeadmasterDashboard {
            total_students,
            total_applications,
            pending,
            completed,
        })
    }

    async fn counts(db: &SqlitePool) -> Result<Counts, AppError> {
        let counts = sqlx::query_as::<_, Counts>(
            r#"SELECT
                (SELECT COUNT(*) FROM students),
                COUNT(*),
                COALESCE(SUM(status = 'Pending'), 0),
                COALESCE(SUM(status = 'Completed'), 0),
                COALESCE(SUM(status = 'Approved'), 0),
                COALESCE(SUM(status = 'Rejected'), 0)
               FROM applications"#,
        )
        .fetch_one(db)
        .await?;

        Ok(counts)
    }
}
