//! `dashgate-auth` — permission and department predicates over the session payload.
//!
//! This crate is intentionally decoupled from HTTP and storage: token
//! validation and login live in the session layer, which hands its result here.

#[macro_use]
mod name_set;

pub mod authorize;
pub mod departments;
pub mod descriptor;
pub mod permissions;
pub mod reserved;
pub mod session;
pub mod user;

pub use authorize::{AccessBasis, AccessExplanation, AccessSubject, explain_department, explain_permission};
pub use departments::{Department, DepartmentList, can_access_department};
pub use descriptor::{NavigationDescriptor, is_truthy};
pub use permissions::{Permission, PermissionSet, has_permission};
pub use reserved::{UNIVERSAL_DEPARTMENT, WILDCARD_PERMISSION};
pub use session::{Organization, SessionError, SessionPayload};
pub use user::User;
