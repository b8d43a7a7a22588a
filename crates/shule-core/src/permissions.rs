//! Roles, actions, and the request-scoped authorization context.
//!
//! Every service operation receives an [`AuthContext`] resolved from the
//! request (bearer token or none) and calls [`AuthContext::authorize`] before
//! touching the store.
//!
//! | Action                          | Anonymous | Parent | Secretary | Headmaster |
//! |---------------------------------|:---------:|:------:|:---------:|:----------:|
//! | submit / payment                |     x     |   x    |           |            |
//! | review / approve / reject       |           |        |     x     |            |
//! | students, reports, results      |           |        |     x     |            |
//! | list announcements and messages |           |        |     x     |            |
//! | create announcements, messages  |           |        |     x     |     x      |
//! | headmaster dashboard            |           |        |           |     x      |
//! | parent dashboard                |           |   x    |           |            |

use std::fmt;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Anonymous,
    Parent,
    Secretary,
    Headmaster,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "anonymous",
            Role::Parent => "parent",
            Role::Secretary => "secretary",
            Role::Headmaster => "headmaster",
        }
    }

    pub fn can(&self, action: Action) -> bool {
        use Action::*;
        match self {
            Role::Anonymous => matches!(action, SubmitApplication | CompletePayment),
            Role::Parent => matches!(
                action,
                SubmitApplication | CompletePayment | ViewParentDashboard
            ),
            Role::Secretary => matches!(
                action,
                ReviewApplications
                    | ApproveApplication
                    | RejectApplication
                    | ListStudents
                    | ViewReports
                    | ListAnnouncements
                    | CreateAnnouncement
                    | ListMessages
                    | SendMessage
            ),
            Role::Headmaster => matches!(
                action,
                ViewHeadmasterDashboard | CreateAnnouncement | SendMessage
            ),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SubmitApplication,
    CompletePayment,
    ReviewApplications,
    ApproveApplication,
    RejectApplication,
    ListStudents,
    ViewReports,
    ListAnnouncements,
    CreateAnnouncement,
    ListMessages,
    SendMessage,
    ViewHeadmasterDashboard,
    ViewParentDashboard,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::SubmitApplication => "applications:submit",
            Action::CompletePayment => "applications:complete",
            Action::ReviewApplications => "applications:review",
            Action::ApproveApplication => "applications:approve",
            Action::RejectApplication => "applications:reject",
            Action::ListStudents => "students:read",
            Action::ViewReports => "reports:read",
            Action::ListAnnouncements => "announcements:read",
            Action::CreateAnnouncement => "announcements:create",
            Action::ListMessages => "messages:read",
            Action::SendMessage => "messages:create",
            Action::ViewHeadmasterDashboard => "dashboard:headmaster",
            Action::ViewParentDashboard => "dashboard:parent",
        }
    }
}

/// Who is calling, resolved once per request.
///
/// `subject` is the staff user id for secretaries and headmasters and the
/// registration number for parents. Anonymous callers have none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    role: Role,
    subject: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self {
            role: Role::Anonymous,
            subject: None,
        }
    }

    pub fn new(role: Role, subject: impl Into<String>) -> Self {
        Self {
            role,
            subject: Some(subject.into()),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Anonymous callers that are refused get 401 so they know to log in;
    /// authenticated callers get 403.
    pub fn authorize(&self, action: Action) -> Result<(), AppError> {
        if self.role.can(action) {
            return Ok(());
        }
        if self.role == Role::Anonymous {
            Err(AppError::unauthorized(anyhow!("Authentication required")))
        } else {
            Err(AppError::forbidden(anyhow!(
                "Role '{}' may not perform '{}'",
                self.role,
                action.as_str()
            )))
        }
    }
}
