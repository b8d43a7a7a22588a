//! Staff accounts and demo applications.

use std::time::Instant;

use anyhow::{Context, bail};
use chrono::{Duration, Local, NaiveDateTime, Utc};
use fake::Fake;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use shule_core::hash_password;
use shule_models::registration::control_number;
use shule_models::{ApplicationStatus, CreateStaffDto, EducationLevel, StaffRole};
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::{info, warn};
use validator::Validate;

/// Control number of the sample application used in payment demos.
pub const SAMPLE_CONTROL_NUMBER: &str = "TEST001";

/// A default staff account read from the environment.
#[derive(Debug, Clone)]
pub struct StaffSeed {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: StaffRole,
}

impl StaffSeed {
    /// Reads `SECRETARY_*` or `HEADMASTER_*`. Returns `None` when no
    /// password is configured for the role.
    pub fn from_env(role: StaffRole) -> Option<Self> {
        let prefix = role.as_str().to_uppercase();
        let password = std::env::var(format!("{prefix}_PASSWORD")).ok()?;

        let username =
            std::env::var(format!("{prefix}_USERNAME")).unwrap_or_else(|_| role.as_str().to_string());
        let email = std::env::var(format!("{prefix}_EMAIL"))
            .unwrap_or_else(|_| format!("{}@shule.local", role.as_str()));

        Some(Self {
            username,
            email,
            password,
            role,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ApplicationSeed {
    pub student_name: String,
    pub birth_date: String,
    pub address: String,
    pub level: EducationLevel,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_email: String,
    pub control_number: String,
    pub status: ApplicationStatus,
}

/// Validates and inserts a staff account, returning its id.
pub async fn create_staff(db: &SqlitePool, dto: &CreateStaffDto) -> anyhow::Result<i64> {
    dto.validate().context("invalid staff account")?;

    let password_hash = hash_password(&dto.password).map_err(|e| e.error)?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, password_hash, role, email, created_at)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT (username) DO NOTHING
         RETURNING id",
    )
    .bind(dto.username.trim())
    .bind(&password_hash)
    .bind(dto.role)
    .bind(dto.email.trim())
    .bind(Utc::now())
    .fetch_optional(db)
    .await?;

    match id {
        Some(id) => Ok(id),
        None => bail!("User '{}' already exists", dto.username.trim()),
    }
}

/// Creates the secretary and headmaster configured in the environment,
/// skipping usernames that already exist. Returns how many were created.
pub async fn ensure_default_staff(db: &SqlitePool) -> anyhow::Result<usize> {
    let mut created = 0;

    for role in [StaffRole::Secretary, StaffRole::Headmaster] {
        let Some(seed) = StaffSeed::from_env(role) else {
            warn!(role = role.as_str(), "no password configured, skipping default account");
            continue;
        };

        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(&seed.username)
            .fetch_one(db)
            .await?;
        if exists > 0 {
            continue;
        }

        let dto = CreateStaffDto {
            username: seed.username,
            email: seed.email,
            password: seed.password,
            role: seed.role,
        };
        create_staff(db, &dto).await?;
        info!(username = %dto.username, role = role.as_str(), "default staff account created");
        created += 1;
    }

    Ok(created)
}

/// Fake applicants spread over all levels, submitted one minute apart
/// going back from `now`. Every fifth one has already paid.
pub fn generate_applications(count: usize, now: NaiveDateTime) -> Vec<ApplicationSeed> {
    (0..count)
        .map(|i| {
            let level = EducationLevel::ALL[i % EducationLevel::ALL.len()];
            let last_name: String = LastName().fake();
            let first_name: String = FirstName().fake();
            let parent_first: String = FirstName().fake();
            let street: String = StreetName().fake();
            let city: String = CityName().fake();
            let year: i32 = (2006..2021).fake();
            let month: u32 = (1..13).fake();
            let day: u32 = (1..29).fake();
            let phone: u32 = (10_000_000..100_000_000).fake();
            let submitted_at = now - Duration::minutes(i as i64);

            ApplicationSeed {
                student_name: format!("{first_name} {last_name}"),
                birth_date: format!("{year:04}-{month:02}-{day:02}"),
                address: format!("{street}, {city}"),
                level,
                parent_name: format!("{parent_first} {last_name}"),
                parent_phone: format!("+2557{phone}"),
                parent_email: SafeEmail().fake(),
                control_number: control_number(level, submitted_at),
                status: if i % 5 == 4 {
                    ApplicationStatus::Completed
                } else {
                    ApplicationStatus::Pending
                },
            }
        })
        .collect()
}

async fn insert_application<'e, E>(executor: E, seed: &ApplicationSeed) -> anyhow::Result<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO applications
             (student_name, birth_date, address, level, parent_name, parent_phone,
              parent_email, date_applied, status, control_number)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&seed.student_name)
    .bind(&seed.birth_date)
    .bind(&seed.address)
    .bind(seed.level)
    .bind(&seed.parent_name)
    .bind(&seed.parent_phone)
    .bind(&seed.parent_email)
    .bind(Utc::now())
    .bind(seed.status)
    .bind(&seed.control_number)
    .execute(executor)
    .await?;

    Ok(())
}

/// Inserts the Completed sample application once. Returns `false` when it
/// already exists.
pub async fn seed_sample_application(db: &SqlitePool) -> anyhow::Result<bool> {
    let exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications WHERE control_number = ?")
            .bind(SAMPLE_CONTROL_NUMBER)
            .fetch_one(db)
            .await?;
    if exists > 0 {
        return Ok(false);
    }

    let sample = ApplicationSeed {
        student_name: "Test Student".to_string(),
        birth_date: "2015-01-01".to_string(),
        address: "Test Address".to_string(),
        level: EducationLevel::Primary,
        parent_name: "Test Parent".to_string(),
        parent_phone: "0712345678".to_string(),
        parent_email: "parent@example.com".to_string(),
        control_number: SAMPLE_CONTROL_NUMBER.to_string(),
        status: ApplicationStatus::Completed,
    };
    insert_application(db, &sample).await?;

    Ok(true)
}

/// Inserts the sample application plus `count` fake ones.
pub async fn seed_demo_applications(db: &SqlitePool, count: usize) -> anyhow::Result<usize> {
    let start = Instant::now();
    println!("🌱 Seeding {count} demo applications...");

    let mut inserted = usize::from(seed_sample_application(db).await?);

    let mut tx = db.begin().await?;
    for seed in generate_applications(count, Local::now().naive_local()) {
        insert_application(&mut *tx, &seed).await?;
        inserted += 1;
    }
    tx.commit().await?;

    println!("   ✓ Inserted {inserted} applications in {:?}", start.elapsed());
    Ok(inserted)
}
