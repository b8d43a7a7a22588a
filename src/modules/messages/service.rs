use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use shule_core::{Action, AppError, AuthContext, PaginationParams};

use crate::modules::messages::model::{PaginatedMessagesResponse, SendMessageDto, StudentMessage};
use crate::modules::students::service::StudentService;

const MESSAGE_COLUMNS: &str =
    "id, student_registration, title, message, attachment, date_sent, sender_role";

pub struct MessageService;

impl MessageService {
    /// Sends a message to the parents of one registered student. The sender
    /// role is taken from the caller.
    #[instrument(skip(db, dto))]
    pub async fn send(
        db: &SqlitePool,
        ctx: &AuthContext,
        dto: SendMessageDto,
    ) -> Result<StudentMessage, AppError> {
        ctx.authorize(Action::SendMessage)?;

        let registration_number = dto.student_registration.trim().to_uppercase();
        let student = StudentService::get_by_registration_number(db, &registration_number).await?;
        let attachment = dto
            .attachment
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty());

        let message = sqlx::query_as::<_, StudentMessage>(&format!(
            r#"INSERT INTO student_messages
                   (student_registration, title, message, attachment, date_sent, sender_role)
               VALUES (?, ?, ?, ?, ?, ?)
               RETURNING {MESSAGE_COLUMNS}"#
        ))
        .bind(&student.registration_number)
        .bind(dto.title.trim())
        .bind(dto.message.trim())
        .bind(attachment)
        .bind(Utc::now())
        .bind(ctx.role().as_str())
        .fetch_one(db)
        .await?;

        info!(
            message_id = message.id,
            student_registration = %message.student_registration,
            sender_role = %message.sender_role,
            "message sent"
        );

        Ok(message)
    }

    #[instrument(skip(db))]
    pub async fn list(
        db: &SqlitePool,
        ctx: &AuthContext,
        pagination: PaginationParams,
    ) -> Result<PaginatedMessagesResponse, AppError> {
        ctx.authorize(Action::ListMessages)?;

        let limit = pagination.limit();
        let offset = pagination.offset();

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM student_messages")
            .fetch_one(db)
            .await?;

        let messages = sqlx::query_as::<_, StudentMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM student_messages \
             ORDER BY date_sent DESC, id DESC LIMIT {limit} OFFSET {offset}"
        ))
        .fetch_all(db)
        .await?;

        Ok(PaginatedMessagesResponse {
            data: messages,
            meta: pagination.meta(total),
        })
    }

    pub async fn for_student(
        db: &SqlitePool,
        registration_number: &str,
    ) -> Result<Vec<StudentMessage>, AppError> {
        let messages = sqlx::query_as::<_, StudentMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM student_messages \
             WHERE student_registration = ? ORDER BY date_sent DESC, id DESC"
        ))
        .bind(registration_number)
        .fetch_all(db)
        .await?;

        Ok(messages)
    }
}
