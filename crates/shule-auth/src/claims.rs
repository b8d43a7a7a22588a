use serde::{Deserialize, Serialize};
use shule_core::{AuthContext, Role};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// `sub` is the staff user id for secretaries and headmasters, and the
/// student's registration number for parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn auth_context(&self) -> AuthContext {
        AuthContext::new(self.role, self.sub.clone())
    }
}
