//! Login payloads for staff and parents.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::students::Student;
use crate::users::User;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "secretary")]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

/// Parents sign in with their child's registration number.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ParentLoginRequest {
    #[validate(length(min = 1, message = "registration_number is required"))]
    #[schema(example = "24PL003")]
    pub registration_number: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParentLoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub student: Student,
}
