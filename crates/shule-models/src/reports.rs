//! Dashboard and report payloads.

use serde::Serialize;
use utoipa::ToSchema;

use crate::announcements::Announcement;
use crate::messages::StudentMessage;
use crate::students::Student;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SecretaryReport {
    pub total_students: i64,
    pub total_applications: i64,
    pub pending: i64,
    pub completed: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HeadmasterDashboard {
    pub total_students: i64,
    pub total_applications: i64,
    pub pending: i64,
    pub completed: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParentDashboard {
    pub student: Student,
    pub announcements: Vec<Announcement>,
    pub messages: Vec<StudentMessage>,
}
