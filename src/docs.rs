use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use shule_config::PaymentChannel;
use shule_core::{PaginationMeta, PaginationParams, Role};
use shule_models::{
    Announcement, Application, ApplicationStatus, CompletePaymentDto, CreateAnnouncementDto,
    EducationLevel, HeadmasterDashboard, LoginRequest, LoginResponse,
    PaginatedAnnouncementsResponse, PaginatedApplicationsResponse, PaginatedMessagesResponse,
    PaginatedStudentsResponse, ParentDashboard, ParentLoginRequest, ParentLoginResponse,
    PaymentInstructions, RejectApplicationDto, SecretaryReport, SendMessageDto, StaffRole, Student,
    StudentMessage, SubmitApplicationDto, User,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_staff,
        crate::modules::auth::controller::login_parent,
        crate::modules::applications::controller::submit_application,
        crate::modules::applications::controller::get_payment_instructions,
        crate::modules::applications::controller::complete_payment,
        crate::modules::applications::controller::list_applications,
        crate::modules::applications::controller::get_application,
        crate::modules::applications::controller::approve_application,
        crate::modules::applications::controller::reject_application,
        crate::modules::students::controller::list_students,
        crate::modules::reports::controller::get_secretary_report,
        crate::modules::reports::controller::get_headmaster_dashboard,
        crate::modules::announcements::controller::create_announcement,
        crate::modules::announcements::controller::create_headmaster_announcement,
        crate::modules::announcements::controller::list_announcements,
        crate::modules::announcements::controller::list_results,
        crate::modules::messages::controller::send_message,
        crate::modules::messages::controller::list_messages,
        crate::modules::parents::controller::get_parent_dashboard,
    ),
    components(
        schemas(
            Role,
            StaffRole,
            User,
            EducationLevel,
            ApplicationStatus,
            Application,
            SubmitApplicationDto,
            CompletePaymentDto,
            RejectApplicationDto,
            PaymentInstructions,
            PaymentChannel,
            PaginatedApplicationsResponse,
            Student,
            PaginatedStudentsResponse,
            LoginRequest,
            LoginResponse,
            ParentLoginRequest,
            ParentLoginResponse,
            Announcement,
            CreateAnnouncementDto,
            PaginatedAnnouncementsResponse,
            StudentMessage,
            SendMessageDto,
            PaginatedMessagesResponse,
            SecretaryReport,
            HeadmasterDashboard,
            ParentDashboard,
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Staff and parent login"),
        (name = "Applications", description = "Public application submission and payment"),
        (name = "Secretary", description = "Application review, students, reports and communication"),
        (name = "Headmaster", description = "Headmaster dashboard and announcements"),
        (name = "Parent", description = "Parent dashboard")
    ),
    info(
        title = "Shule Admissions API",
        version = "0.1.0",
        description = "Admissions and registration for a KG to A-Level school, built with Rust, Axum and SQLite.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
