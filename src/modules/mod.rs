pub mod announcements;
pub mod applications;
pub mod auth;
pub mod messages;
pub mod parents;
pub mod registration;
pub mod reports;
pub mod students;
