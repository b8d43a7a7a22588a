use anyhow::anyhow;
use sqlx::SqlitePool;
use tracing::instrument;

use shule_core::{Action, AppError, AuthContext};
use shule_models::EducationLevel;

use crate::modules::students::model::{PaginatedStudentsResponse, Student, StudentFilterParams};

pub(crate) const STUDENT_COLUMNS: &str = "id, full_name, birth_date, address, level, \
     registration_number, parent_name, parent_phone, parent_email, date_registered, password, \
     status, application_id";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn list_students(
        db: &SqlitePool,
        ctx: &AuthContext,
        filters: StudentFilterParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        ctx.authorize(Action::ListStudents)?;

        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let level = match filters.level.as_deref().filter(|l| !l.trim().is_empty()) {
            Some(level) => Some(level.parse::<EducationLevel>()?),
            None => None,
        };
        let where_clause = if level.is_some() { " WHERE level = ?" } else { "" };

        let count_query = format!("SELECT COUNT(*) FROM students{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(level) = level {
            count_sql = count_sql.bind(level);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {STUDENT_COLUMNS} FROM students{where_clause} \
             ORDER BY registration_number LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Student>(&data_query);
        if let Some(level) = level {
            data_sql = data_sql.bind(level);
        }
        let students = data_sql.fetch_all(db).await?;

        Ok(PaginatedStudentsResponse {
            data: students,
            meta: filters.pagination.meta(total),
        })
    }

    #[instrument(skip(db))]
    pub async fn find_by_registration_number(
        db: &SqlitePool,
        registration_number: &str,
    ) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE registration_number = ?"
        ))
        .bind(registration_number)
        .fetch_optional(db)
        .await?;

        Ok(student)
    }

    pub async fn get_by_registration_number(
        db: &SqlitePool,
        registration_number: &str,
    ) -> Result<Student, AppError> {
        Self::find_by_registration_number(db, registration_number)
            .await?
            .ok_or_else(|| {
                AppError::not_found(anyhow!("Student {} not found", registration_number))
            })
    }
}
