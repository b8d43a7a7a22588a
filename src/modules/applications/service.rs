use anyhow::anyhow;
use chrono::{Local, Utc};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};
use tracing::{debug, info, instrument, warn};

use shule_config::PaymentChannel;
use shule_core::{Action, AppError, AuthContext};
use shule_models::registration::control_number;
use shule_models::students::ACTIVE_STATUS;

use crate::metrics::{
    track_application_decided, track_application_submitted, track_payment_completed,
    track_registration_allocated,
};
use crate::modules::applications::model::{
    Application, ApplicationFilterParams, ApplicationStatus, CompletePaymentDto,
    DEFAULT_REJECTION_NOTE, EducationLevel, PaginatedApplicationsResponse, PaymentInstructions,
    Student, SubmitApplicationDto,
};
use crate::modules::registration::RegistrationService;
use crate::modules::students::service::STUDENT_COLUMNS;

/// Registration numbers tried per approval before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 5;

const APPLICATION_COLUMNS: &str = "id, student_name, birth_date, address, level, parent_name, \
     parent_phone, parent_email, date_applied, status, control_number, payment_proof, notes, \
     reviewed_at";

/// Statuses an application can still leave.
const OPEN_STATUSES: &str = "('Pending', 'Completed')";

pub struct ApplicationService;

impl ApplicationService {
    #[instrument(skip(db, dto))]
    pub async fn submit(
        db: &SqlitePool,
        ctx: &AuthContext,
        level: EducationLevel,
        dto: SubmitApplicationDto,
    ) -> Result<Application, AppError> {
        ctx.authorize(Action::SubmitApplication)?;

        let submitted_at = Local::now();
        let control_number = control_number(level, submitted_at.naive_local());

        let application = sqlx::query_as::<_, Application>(&format!(
            r#"INSERT INTO applications
                   (student_name, birth_date, address, level, parent_name, parent_phone,
                    parent_email, date_applied, status, control_number)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {APPLICATION_COLUMNS}"#
        ))
        .bind(dto.student_name.trim())
        .bind(dto.birth_date.trim())
        .bind(dto.address.trim())
        .bind(level)
        .bind(dto.parent_name.trim())
        .bind(dto.parent_phone.trim())
        .bind(dto.parent_email.trim())
        .bind(submitted_at.with_timezone(&Utc))
        .bind(ApplicationStatus::Pending)
        .bind(&control_number)
        .fetch_one(db)
        .await?;

        info!(
            application_id = application.id,
            control_number = %application.control_number,
            "application submitted"
        );
        track_application_submitted(level);

        Ok(application)
    }

    /// Pending becomes Completed; repeating it on a Completed application only
    /// refreshes the proof. Decided applications are never reopened.
    #[instrument(skip(db, dto))]
    pub async fn mark_payment_completed(
        db: &SqlitePool,
        ctx: &AuthContext,
        id: i64,
        dto: CompletePaymentDto,
    ) -> Result<Application, AppError> {
        ctx.authorize(Action::CompletePayment)?;

        let proof = dto
            .payment_proof
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());

        let paid = sqlx::query_as::<_, Application>(&format!(
            r#"UPDATE applications
               SET status = 'Completed', payment_proof = COALESCE(?, payment_proof)
               WHERE id = ? AND status = 'Pending'
               RETURNING {APPLICATION_COLUMNS}"#
        ))
        .bind(proof)
        .bind(id)
        .fetch_optional(db)
        .await?;

        if let Some(application) = paid {
            info!(application_id = id, "payment marked completed");
            track_payment_completed(application.level);
            return Ok(application);
        }

        let refreshed = sqlx::query_as::<_, Application>(&format!(
            r#"UPDATE applications
               SET payment_proof = COALESCE(?, payment_proof)
               WHERE id = ? AND status = 'Completed'
               RETURNING {APPLICATION_COLUMNS}"#
        ))
        .bind(proof)
        .bind(id)
        .fetch_optional(db)
        .await?;

        let Some(application) = refreshed else {
            return Err(Self::transition_error(db, id, "complete payment for").await);
        };

        debug!(application_id = id, "payment already completed");

        Ok(application)
    }

    #[instrument(skip(db, channels))]
    pub async fn payment_instructions(
        db: &SqlitePool,
        ctx: &AuthContext,
        id: i64,
        channels: &[PaymentChannel],
    ) -> Result<PaymentInstructions, AppError> {
        ctx.authorize(Action::CompletePayment)?;

        let application = Self::find_application(db, id).await?;
        Ok(PaymentInstructions::for_application(&application, channels))
    }

    #[instrument(skip(db))]
    pub async fn get_application(
        db: &SqlitePool,
        ctx: &AuthContext,
        id: i64,
    ) -> Result<Application, AppError> {
        ctx.authorize(Action::ReviewApplications)?;
        Self::find_application(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn list_applications(
        db: &SqlitePool,
        ctx: &AuthContext,
        filters: ApplicationFilterParams,
    ) -> Result<PaginatedApplicationsResponse, AppError> {
        ctx.authorize(Action::ReviewApplications)?;

        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::from(" WHERE 1 = 1");
        let mut params: Vec<&'static str> = Vec::new();

        if let Some(level) = filters.level.as_deref().filter(|l| !l.trim().is_empty()) {
            params.push(level.parse::<EducationLevel>()?.as_str());
            where_clause.push_str(" AND level = ?");
        }
        if let Some(status) = filters.status.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(status.parse::<ApplicationStatus>()?.as_str());
            where_clause.push_str(" AND status = ?");
        }

        let count_query = format!("SELECT COUNT(*) FROM applications{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(*param);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications{where_clause} \
             ORDER BY date_applied DESC, id DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Application>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let applications = data_sql.fetch_all(db).await?;

        Ok(PaginatedApplicationsResponse {
            data: applications,
            meta: filters.pagination.meta(total),
        })
    }

    /// Approves an open application and provisions its student.
    ///
    /// Claiming the application, allocating the registration number and
    /// inserting the student happen in one transaction; any failure leaves
    /// the store untouched. The claim is the first statement so the
    /// transaction holds SQLite's write lock before reading the counters.
    #[instrument(skip(db, parent_password_hash))]
    pub async fn approve(
        db: &SqlitePool,
        ctx: &AuthContext,
        id: i64,
        as_of_year: i32,
        parent_password_hash: &str,
    ) -> Result<Student, AppError> {
        ctx.authorize(Action::ApproveApplication)?;

        let mut tx = db.begin().await?;

        let claimed = sqlx::query_as::<_, Application>(&format!(
            r#"UPDATE applications
               SET status = 'Approved', reviewed_at = ?
               WHERE id = ? AND status IN {OPEN_STATUSES}
               RETURNING {APPLICATION_COLUMNS}"#
        ))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(application) = claimed else {
            return Err(Self::transition_error(&mut *tx, id, "approve").await);
        };

        let mut attempts = 0;
        let student = loop {
            attempts += 1;
            let registration_number =
                RegistrationService::allocate(&mut tx, application.level, as_of_year).await?;

            match Self::insert_student(&mut tx, &application, &registration_number, parent_password_hash)
                .await
            {
                Ok(student) => break student,
                Err(e) if is_registration_collision(&e) && attempts < MAX_ALLOCATION_ATTEMPTS => {
                    warn!(
                        application_id = id,
                        registration_number = %registration_number,
                        attempts,
                        "registration number already taken, allocating another"
                    );
                }
                Err(e) => return Err(AppError::database(e)),
            }
        };

        tx.commit().await?;

        info!(
            application_id = id,
            student_id = student.id,
            registration_number = %student.registration_number,
            "application approved"
        );
        track_registration_allocated(application.level, attempts);
        track_application_decided(application.level, "approved");

        Ok(student)
    }

    /// Rejects an open application. A blank or missing reason stores the
    /// default note.
    #[instrument(skip(db))]
    pub async fn reject(
        db: &SqlitePool,
        ctx: &AuthContext,
        id: i64,
        reason: Option<String>,
    ) -> Result<Application, AppError> {
        ctx.authorize(Action::RejectApplication)?;

        let notes = reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REJECTION_NOTE);

        let updated = sqlx::query_as::<_, Application>(&format!(
            r#"UPDATE applications
               SET status = 'Rejected', notes = ?, reviewed_at = ?
               WHERE id = ? AND status IN {OPEN_STATUSES}
               RETURNING {APPLICATION_COLUMNS}"#
        ))
        .bind(notes)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(db)
        .await?;

        let Some(application) = updated else {
            return Err(Self::transition_error(db, id, "reject").await);
        };

        info!(application_id = id, "application rejected");
        track_application_decided(application.level, "rejected");

        Ok(application)
    }

    async fn find_application(db: &SqlitePool, id: i64) -> Result<Application, AppError> {
        sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Application {} not found", id)))
    }

    async fn insert_student(
        conn: &mut SqliteConnection,
        application: &Application,
        registration_number: &str,
        parent_password_hash: &str,
    ) -> Result<Student, sqlx::Error> {
        sqlx::query_as::<_, Student>(&format!(
            r#"INSERT INTO students
                   (full_name, birth_date, address, level, registration_number, parent_name,
                    parent_phone, parent_email, date_registered, password, status, application_id)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {STUDENT_COLUMNS}"#
        ))
        .bind(&application.student_name)
        .bind(&application.birth_date)
        .bind(&application.address)
        .bind(application.level)
        .bind(registration_number)
        .bind(&application.parent_name)
        .bind(&application.parent_phone)
        .bind(&application.parent_email)
        .bind(Utc::now())
        .bind(parent_password_hash)
        .bind(ACTIVE_STATUS)
        .bind(application.id)
        .fetch_one(&mut *conn)
        .await
    }

    /// Explains why a guarded update touched no row: the application is
    /// missing (404), already decided (409), or was moved by a concurrent
    /// request (409).
    async fn transition_error<'e, E>(executor: E, id: i64, action: &str) -> AppError
    where
        E: SqliteExecutor<'e>,
    {
        let status = sqlx::query_scalar::<_, ApplicationStatus>(
            "SELECT status FROM applications WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(executor)
        .await;

        match status {
            Ok(None) => AppError::not_found(anyhow!("Application {} not found", id)),
            Ok(Some(status)) if status.is_terminal() => AppError::conflict(anyhow!(
                "Cannot {} application {}: it is already {}",
                action,
                id,
                status
            )),
            Ok(Some(status)) => AppError::conflict(anyhow!(
                "Cannot {} application {}: it changed concurrently and is now {}",
                action,
                id,
                status
            )),
            Err(e) => AppError::database(e),
        }
    }
}

fn is_registration_collision(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() && db_err.message().contains("registration_number")
    )
}
