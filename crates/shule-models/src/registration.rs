//! Registration and control number formats.
//!
//! Registration numbers look like `24PL003`: two-digit year, level prefix,
//! then a sequence padded to at least three digits. Control numbers look like
//! `PL20240115093000`: level prefix then the local submission timestamp.

use chrono::NaiveDateTime;

use crate::levels::EducationLevel;

/// Two-digit year, e.g. `2024` becomes `"24"` and `2007` becomes `"07"`.
pub fn year_code(as_of_year: i32) -> String {
    format!("{:02}", as_of_year.rem_euclid(100))
}

/// Leading part shared by every registration number of a level and year.
pub fn registration_prefix(year_code: &str, level: EducationLevel) -> String {
    format!("{}{}", year_code, level.prefix())
}

pub fn format_registration_number(year_code: &str, level: EducationLevel, sequence: i64) -> String {
    format!("{}{}{:03}", year_code, level.prefix(), sequence)
}

pub fn control_number(level: EducationLevel, submitted_at: NaiveDateTime) -> String {
    format!("{}{}", level.prefix(), submitted_at.format("%Y%m%d%H%M%S"))
}
