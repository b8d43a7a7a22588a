//! # Shule Models
//!
//! Domain entities, request/response DTOs and the pure numbering rules.
//!
//! - [`levels`]: the four education levels, their prefixes and fees
//! - [`applications`]: enrollment applications and their status machine
//! - [`registration`]: registration and control number formatting
//! - [`students`]: students provisioned by approval
//! - [`users`]: staff accounts
//! - [`auth`]: login payloads
//! - [`announcements`], [`messages`]: school communication
//! - [`reports`]: dashboard and report payloads

pub mod announcements;
pub mod applications;
pub mod auth;
pub mod levels;
pub mod messages;
pub mod registration;
pub mod reports;
pub mod students;
pub mod users;
mod validation;

pub use announcements::{
    Announcement, AnnouncementFilterParams, CreateAnnouncementDto, PaginatedAnnouncementsResponse,
};
pub use applications::{
    Application, ApplicationFilterParams, ApplicationStatus, CompletePaymentDto,
    PaginatedApplicationsResponse, PaymentInstructions, RejectApplicationDto, SubmitApplicationDto,
};
pub use auth::{LoginRequest, LoginResponse, ParentLoginRequest, ParentLoginResponse};
pub use levels::EducationLevel;
pub use messages::{PaginatedMessagesResponse, SendMessageDto, StudentMessage};
pub use reports::{HeadmasterDashboard, ParentDashboard, SecretaryReport};
pub use students::{PaginatedStudentsResponse, Student, StudentFilterParams};
pub use users::{CreateStaffDto, StaffRole, User};
