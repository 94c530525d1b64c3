use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

use crate::permissions::PermissionSet;
use crate::reserved::UNIVERSAL_DEPARTMENT;

/// A coarse-grained functional area (e.g. `"Rental"`, `"Parts"`) gating a group of pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Department(Cow<'static, str>);

impl Department {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn universal() -> Self {
        Self(Cow::Borrowed(UNIVERSAL_DEPARTMENT))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_universal(&self) -> bool {
        self.as_str() == UNIVERSAL_DEPARTMENT
    }
}

impl Borrow<str> for Department {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Department {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

name_set!(
    /// Departments the signed-in user may open.
    DepartmentList,
    Department
);

impl DepartmentList {
    pub fn has_universal(&self) -> bool {
        self.contains(UNIVERSAL_DEPARTMENT)
    }
}

/// Decide whether a department tab is visible.
///
/// Granted when any of the following holds:
/// - `name` is listed
/// - the universal department is listed
/// - `permissions` holds the wildcard
/// - `name` *is* the universal department (it is implicitly present in every list)
///
/// Department routing is coarser than report permissions: it answers "can
/// you see the Rental tab at all", not "can you run this report".
pub fn can_access_department(
    departments: &DepartmentList,
    name: &str,
    permissions: &PermissionSet,
) -> bool {
    name == UNIVERSAL_DEPARTMENT
        || permissions.has_wildcard()
        || departments.has_universal()
        || departments.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::Permission;
    use proptest::prelude::*;

    #[test]
    fn listed_department_is_accessible() {
        let depts: DepartmentList = ["Parts", "Service"].into_iter().collect();
        let perms = PermissionSet::new();
        assert!(can_access_department(&depts, "Parts", &perms));
        assert!(!can_access_department(&depts, "Rental", &perms));
    }

    #[test]
    fn universal_department_in_list_opens_everything() {
        let depts: DepartmentList = [UNIVERSAL_DEPARTMENT].into_iter().collect();
        let perms = PermissionSet::new();
        assert!(can_access_department(&depts, "Dashboard", &perms));
        assert!(can_access_department(&depts, "Rental", &perms));
    }

    #[test]
    fn wildcard_permission_opens_every_department() {
        let depts = DepartmentList::new();
        let perms: PermissionSet = [Permission::wildcard()].into_iter().collect();
        assert!(can_access_department(&depts, "Accounting", &perms));
    }

    #[test]
    fn empty_inputs_deny_ordinary_departments() {
        assert!(!can_access_department(
            &DepartmentList::new(),
            "Rental",
            &PermissionSet::new()
        ));
    }

    proptest! {
        #[test]
        fn universal_department_always_passes(
            listed in prop::collection::vec("[A-Za-z]{1,10}", 0..6),
        ) {
            let depts: DepartmentList = listed.iter().map(String::as_str).collect();
            prop_assert!(can_access_department(&depts, UNIVERSAL_DEPARTMENT, &PermissionSet::new()));
        }

        #[test]
        fn wildcard_dominates_departments(
            listed in prop::collection::vec("[A-Za-z]{1,10}", 0..6),
            name in ".{0,16}",
        ) {
            let depts: DepartmentList = listed.iter().map(String::as_str).collect();
            let mut perms: PermissionSet = listed.iter().map(String::as_str).collect();
            perms.insert(Permission::wildcard());
            prop_assert!(can_access_department(&depts, &name, &perms));
        }
    }
}
