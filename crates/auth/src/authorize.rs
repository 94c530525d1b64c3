use serde::Serialize;

use dashgate_core::UserId;

use crate::reserved::{UNIVERSAL_DEPARTMENT, WILDCARD_PERMISSION};
use crate::user::User;

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// What was being checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum AccessSubject {
    Permission(String),
    Department(String),
}

/// Which rule decided the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessBasis {
    /// The wildcard permission is held.
    Wildcard,
    /// The name is listed verbatim.
    Listed,
    /// The universal department is requested or listed.
    UniversalDepartment,
    /// Nothing grants it.
    Missing,
}

/// Explanation of a permission or department decision, for structured logs.
///
/// Agrees with [`crate::has_permission`] and [`crate::can_access_department`]
/// on `granted`; only the explanation is extra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessExplanation {
    pub user_id: UserId,
    pub subject: AccessSubject,
    pub granted: bool,
    pub basis: AccessBasis,
    pub reason: String,
}

/// Explain why `user` does or does not hold permission `name`.
pub fn explain_permission(user: &User, name: &str) -> AccessExplanation {
    let (basis, reason) = if user.permissions.has_wildcard() {
        (
            AccessBasis::Wildcard,
            format!("user holds wildcard permission '{WILDCARD_PERMISSION}'"),
        )
    } else if user.permissions.contains(name) {
        (
            AccessBasis::Listed,
            format!("user holds permission '{name}'"),
        )
    } else {
        (
            AccessBasis::Missing,
            format!(
                "permission '{name}' not granted; user holds {:?}",
                user.permissions.sorted().iter().map(|p| p.as_str()).collect::<Vec<_>>()
            ),
        )
    };

    AccessExplanation {
        user_id: user.id.clone(),
        subject: AccessSubject::Permission(name.to_string()),
        granted: basis != AccessBasis::Missing,
        basis,
        reason,
    }
}

/// Explain why `user` can or cannot open department `name`.
pub fn explain_department(user: &User, name: &str) -> AccessExplanation {
    let departments = &user.accessible_departments;

    let (basis, reason) = if name == UNIVERSAL_DEPARTMENT {
        (
            AccessBasis::UniversalDepartment,
            format!("'{UNIVERSAL_DEPARTMENT}' is visible to every user"),
        )
    } else if user.permissions.has_wildcard() {
        (
            AccessBasis::Wildcard,
            format!("user holds wildcard permission '{WILDCARD_PERMISSION}'"),
        )
    } else if departments.has_universal() {
        (
            AccessBasis::UniversalDepartment,
            format!("department list contains '{UNIVERSAL_DEPARTMENT}'"),
        )
    } else if departments.contains(name) {
        (
            AccessBasis::Listed,
            format!("department '{name}' is listed"),
        )
    } else {
        (
            AccessBasis::Missing,
            format!(
                "department '{name}' not accessible; user may open {:?}",
                departments.sorted().iter().map(|d| d.as_str()).collect::<Vec<_>>()
            ),
        )
    };

    AccessExplanation {
        user_id: user.id.clone(),
        subject: AccessSubject::Department(name.to_string()),
        granted: basis != AccessBasis::Missing,
        basis,
        reason,
    }
}
