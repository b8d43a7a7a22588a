//! # Shule Core
//!
//! Foundational types shared by every other crate in the workspace:
//!
//! - [`errors`]: the [`AppError`] type and its HTTP response mapping
//! - [`pagination`]: query parameters and response metadata for list endpoints
//! - [`password`]: bcrypt hashing helpers
//! - [`permissions`]: the role/action matrix and the per-request [`AuthContext`]
//!
//! # Example
//!
//! ```ignore
//! use shule_core::{AppError, AuthContext, permissions::Action};
//!
//! fn approve(ctx: &AuthContext) -> Result<(), AppError> {
//!     ctx.authorize(Action::ApproveApplication)?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod permissions;

pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
pub use permissions::{Action, AuthContext, Role};
