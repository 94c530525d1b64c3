//! The signed-in user as delivered by session bootstrap or login.

use serde::{Deserialize, Serialize};

use dashgate_core::UserId;

use crate::departments::{DepartmentList, can_access_department};
use crate::descriptor::NavigationDescriptor;
use crate::permissions::{PermissionSet, has_permission};

/// Signed-in principal.
///
/// # Invariants
/// - Created on successful authentication, cleared on logout.
/// - Replaced wholesale on token or permission refresh; never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    #[serde(default)]
    pub email: String,

    #[serde(default, alias = "name")]
    pub display_name: String,

    #[serde(default)]
    pub permissions: PermissionSet,

    #[serde(default)]
    pub accessible_departments: DepartmentList,

    /// Per-page exposure computed by the backend.
    #[serde(default)]
    pub navigation: NavigationDescriptor,
}

impl User {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            email: String::new(),
            display_name: String::new(),
            permissions: PermissionSet::new(),
            accessible_departments: DepartmentList::new(),
            navigation: NavigationDescriptor::new(),
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_departments(mut self, departments: DepartmentList) -> Self {
        self.accessible_departments = departments;
        self
    }

    pub fn with_navigation(mut self, navigation: NavigationDescriptor) -> Self {
        self.navigation = navigation;
        self
    }

    pub fn has_permission(&self, name: &str) -> bool {
        has_permission(&self.permissions, name)
    }

    pub fn can_access_department(&self, name: &str) -> bool {
        can_access_department(&self.accessible_departments, name, &self.permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_payload() {
        let raw = r#"{"id": "0190c2a4-7b1e-7cc0-8a55-4f1d2b3c4d5e"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert!(user.permissions.is_empty());
        assert!(user.accessible_departments.is_empty());
        assert!(user.navigation.is_empty());
    }

    #[test]
    fn null_collections_are_empty() {
        let raw = r#"{
            "id": "0190c2a4-7b1e-7cc0-8a55-4f1d2b3c4d5e",
            "name": "Pat",
            "permissions": null,
            "accessible_departments": null,
            "navigation": null
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.display_name, "Pat");
        assert!(!user.has_permission("view_parts"));
        assert!(user.navigation.is_empty());
    }

    #[test]
    fn delegates_to_predicates() {
        let user = User::new(UserId::new("u-1"))
            .with_permissions(["view_parts"].into_iter().collect())
            .with_departments(["Parts"].into_iter().collect());
        assert!(user.has_permission("view_parts"));
        assert!(user.can_access_department("Parts"));
        assert!(user.can_access_department("Dashboard"));
        assert!(!user.can_access_department("Rental"));
    }
}
