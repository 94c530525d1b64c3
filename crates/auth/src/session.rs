//! Handoff contract with the external session layer.
//!
//! Token validation and credential exchange happen elsewhere; what arrives
//! here is their *result*: either a [`SessionPayload`] or a [`SessionError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dashgate_core::OrganizationId;

use crate::departments::DepartmentList;
use crate::permissions::PermissionSet;
use crate::user::User;

/// The organization (tenant) the session is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,

    #[serde(default)]
    pub name: String,
}

/// Successful result of session bootstrap or login.
///
/// The top-level `permissions` / `accessible_departments` lists, when the
/// backend sends them, are authoritative over the copies embedded in `user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub user: User,
    pub organization: Organization,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,

    #[serde(default, alias = "accessibleDepartments", skip_serializing_if = "Option::is_none")]
    pub accessible_departments: Option<DepartmentList>,
}

impl SessionPayload {
    pub fn new(user: User, organization: Organization) -> Self {
        Self {
            user,
            organization,
            permissions: None,
            accessible_departments: None,
        }
    }

    /// Resolve the effective user record for this session.
    pub fn into_parts(self) -> (User, Organization) {
        let mut user = self.user;
        if let Some(permissions) = self.permissions {
            user.permissions = permissions;
        }
        if let Some(departments) = self.accessible_departments {
            user.accessible_departments = departments;
        }
        (user, self.organization)
    }

    /// See [`SessionPayload::into_parts`].
    pub fn into_user(self) -> User {
        self.into_parts().0
    }
}

/// Failure reported by session bootstrap or login.
///
/// None of these reach the end user as a navigation error; the shell simply
/// stays on the sign-in view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    Expired,

    #[error("network error: {0}")]
    Network(String),

    #[error("session rejected: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "user": {
            "id": "0190c2a4-7b1e-7cc0-8a55-4f1d2b3c4d5e",
            "permissions": ["view_parts"],
            "accessible_departments": ["Parts"],
            "navigation": {"parts": true}
        },
        "organization": {"id": "0190c2a4-7b1e-7cc0-8a55-000000000001", "name": "Acme Equipment"},
        "permissions": ["view_parts", "view_rental"],
        "accessibleDepartments": ["Parts", "Rental"]
    }"#;

    #[test]
    fn top_level_lists_override_embedded_ones() {
        let payload: SessionPayload = serde_json::from_str(PAYLOAD).unwrap();
        let (user, org) = payload.into_parts();
        assert_eq!(org.name, "Acme Equipment");
        assert!(user.has_permission("view_rental"));
        assert!(user.can_access_department("Rental"));
    }

    #[test]
    fn embedded_lists_apply_when_top_level_absent() {
        let mut payload: SessionPayload = serde_json::from_str(PAYLOAD).unwrap();
        payload.permissions = None;
        payload.accessible_departments = None;
        let user = payload.into_user();
        assert!(user.has_permission("view_parts"));
        assert!(!user.has_permission("view_rental"));
        assert!(!user.can_access_department("Rental"));
    }

    #[test]
    fn integer_ids_from_backend_deserialize() {
        let payload: SessionPayload = serde_json::from_str(
            r#"{
                "user": {"id": 42, "name": "Pat", "navigation": {"parts": true}},
                "organization": {"id": 7}
            }"#,
        )
        .unwrap();
        let (user, org) = payload.into_parts();
        assert_eq!(user.id.as_str(), "42");
        assert_eq!(org.id, OrganizationId::from(7u64));
        assert!(org.name.is_empty());
    }
}
