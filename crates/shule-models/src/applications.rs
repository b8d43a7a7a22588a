//! Enrollment applications.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shule_config::PaymentChannel;
use shule_core::{AppError, PaginationMeta, PaginationParams};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::levels::EducationLevel;
use crate::validation::not_blank;

/// Notes stored on a rejection when the secretary gives no reason.
pub const DEFAULT_REJECTION_NOTE: &str = "Maombi yamekataliwa bila maelezo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum ApplicationStatus {
    Pending,
    Completed,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Completed => "Completed",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Approved and Rejected applications never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "completed" => Ok(ApplicationStatus::Completed),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(AppError::bad_request(anyhow::anyhow!(
                "Invalid application status: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Application {
    pub id: i64,
    pub student_name: String,
    pub birth_date: String,
    pub address: String,
    pub level: EducationLevel,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_email: String,
    pub date_applied: DateTime<Utc>,
    pub status: ApplicationStatus,
    #[schema(example = "PL20240115093000")]
    pub control_number: String,
    pub payment_proof: Option<String>,
    pub notes: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Applicant fields; the level comes from the URL.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitApplicationDto {
    #[validate(
        custom(function = "not_blank", message = "student_name is required"),
        length(max = 100, message = "student_name must be at most 100 characters")
    )]
    pub student_name: String,
    #[validate(
        custom(function = "not_blank", message = "birth_date is required"),
        length(max = 20, message = "birth_date must be at most 20 characters")
    )]
    #[schema(example = "2018-03-14")]
    pub birth_date: String,
    #[validate(
        custom(function = "not_blank", message = "address is required"),
        length(max = 200, message = "address must be at most 200 characters")
    )]
    pub address: String,
    #[validate(
        custom(function = "not_blank", message = "parent_name is required"),
        length(max = 100, message = "parent_name must be at most 100 characters")
    )]
    pub parent_name: String,
    #[validate(
        custom(function = "not_blank", message = "parent_phone is required"),
        length(max = 20, message = "parent_phone must be at most 20 characters")
    )]
    #[schema(example = "0755123456")]
    pub parent_phone: String,
    #[validate(
        custom(function = "not_blank", message = "parent_email is required"),
        length(max = 120, message = "parent_email must be at most 120 characters")
    )]
    pub parent_email: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CompletePaymentDto {
    /// Reference to an uploaded receipt (path or URL)
    #[validate(length(max = 200, message = "payment_proof must be at most 200 characters"))]
    pub payment_proof: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RejectApplicationDto {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ApplicationFilterParams {
    /// Level code or alias, e.g. `PRIMARY` or `o-level`
    pub level: Option<String>,
    /// `Pending`, `Completed`, `Approved` or `Rejected`
    pub status: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedApplicationsResponse {
    pub data: Vec<Application>,
    pub meta: PaginationMeta,
}

/// What a parent needs to pay for an application.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentInstructions {
    pub application_id: i64,
    pub control_number: String,
    pub level: EducationLevel,
    pub amount_tzs: i64,
    pub status: ApplicationStatus,
    pub channels: Vec<PaymentChannel>,
}

impl PaymentInstructions {
    pub fn for_application(application: &Application, channels: &[PaymentChannel]) -> Self {
        Self {
            application_id: application.id,
            control_number: application.control_number.clone(),
            level: application.level,
            amount_tzs: application.level.fee_tzs(),
            status: application.status,
            channels: channels.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> SubmitApplicationDto {
        SubmitApplicationDto {
            student_name: "Asha Juma".to_string(),
            birth_date: "2018-03-14".to_string(),
            address: "Mwanakwerekwe, Zanzibar".to_string(),
            parent_name: "Juma Ali".to_string(),
            parent_phone: "0755123456".to_string(),
            parent_email: "juma@example.com".to_string(),
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_blank_field_is_rejected() {
        let mut dto = valid_dto();
        dto.address = "   ".to_string();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("address"));
    }

    #[test]
    fn test_oversized_field_is_rejected() {
        let mut dto = valid_dto();
        dto.parent_phone = "0".repeat(21);
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("parent_phone"));
    }

    #[test]
    fn test_status_terminality() {
        assert!(!ApplicationStatus::Pending.is_terminal());
        assert!(!ApplicationStatus::Completed.is_terminal());
        assert!(ApplicationStatus::Approved.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(
            "completed".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Completed
        );
        assert!("archived".parse::<ApplicationStatus>().is_err());
    }
}
