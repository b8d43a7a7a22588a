//! Education levels offered by the school.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shule_core::AppError;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum EducationLevel {
    Kg,
    Primary,
    OLevel,
    ALevel,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 4] = [
        EducationLevel::Kg,
        EducationLevel::Primary,
        EducationLevel::OLevel,
        EducationLevel::ALevel,
    ];

    /// Stored code, e.g. `OLEVEL`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Kg => "KG",
            EducationLevel::Primary => "PRIMARY",
            EducationLevel::OLevel => "OLEVEL",
            EducationLevel::ALevel => "ALEVEL",
        }
    }

    /// Two-letter prefix used in control and registration numbers.
    pub fn prefix(&self) -> &'static str {
        match self {
            EducationLevel::Kg => "KG",
            EducationLevel::Primary => "PL",
            EducationLevel::OLevel => "OL",
            EducationLevel::ALevel => "AL",
        }
    }

    /// Application fee in Tanzanian shillings.
    pub fn fee_tzs(&self) -> i64 {
        match self {
            EducationLevel::Kg => 30_000,
            EducationLevel::Primary => 50_000,
            EducationLevel::OLevel => 70_000,
            EducationLevel::ALevel => 80_000,
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts stored codes and the URL aliases (`nursery`, `o-level`, ...)
/// case-insensitively.
impl FromStr for EducationLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" | "nursery" => Ok(EducationLevel::Kg),
            "primary" => Ok(EducationLevel::Primary),
            "olevel" | "o-level" | "o_level" => Ok(EducationLevel::OLevel),
            "alevel" | "a-level" | "a_level" => Ok(EducationLevel::ALevel),
            _ => Err(AppError::invalid_level(s)),
        }
    }
}
