//! Registration number allocation.
//!
//! The next sequence for a (year, level) pair is one past the largest of the
//! stored counter, the number of existing students with that prefix, and the
//! highest sequence already used under that prefix. Numbers entered by hand
//! are therefore skipped in one step. The counter row is written in the same
//! statement, so callers inside a transaction that already holds the write
//! lock get a strictly increasing sequence.

use sqlx::SqliteConnection;
use tracing::{debug, instrument};

use shule_core::AppError;
use shule_models::EducationLevel;
use shule_models::registration::{format_registration_number, registration_prefix, year_code};

pub struct RegistrationService;

impl RegistrationService {
    #[instrument(skip(conn))]
    pub async fn allocate(
        conn: &mut SqliteConnection,
        level: EducationLevel,
        as_of_year: i32,
    ) -> Result<String, AppError> {
        let year = year_code(as_of_year);
        let prefix = registration_prefix(&year, level);
        let pattern = format!("{prefix}%");

        let sequence = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO registration_counters (year_code, prefix, last_sequence)
               VALUES (?, ?, (
                   SELECT MAX(
                       COUNT(*),
                       COALESCE(MAX(CAST(SUBSTR(registration_number, ?) AS INTEGER)), 0)
                   ) + 1
                   FROM students
                   WHERE registration_number LIKE ?
               ))
               ON CONFLICT (year_code, prefix) DO UPDATE
               SET last_sequence = MAX(registration_counters.last_sequence + 1, excluded.last_sequence)
               RETURNING last_sequence"#,
        )
        .bind(&year)
        .bind(level.prefix())
        .bind(prefix.len() as i64 + 1)
        .bind(&pattern)
        .fetch_one(&mut *conn)
        .await?;

        let number = format_registration_number(&year, level, sequence);
        debug!(registration_number = %number, "allocated registration number");
        Ok(number)
    }
}
