use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

use crate::reserved::WILDCARD_PERMISSION;

/// Permission identifier.
///
/// Permissions are opaque strings issued by the backend (e.g. `"view_parts"`).
/// The reserved wildcard [`WILDCARD_PERMISSION`] means "all permissions granted".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn wildcard() -> Self {
        Self(Cow::Borrowed(WILDCARD_PERMISSION))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == WILDCARD_PERMISSION
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

name_set!(
    /// The permissions granted to the signed-in user.
    ///
    /// A missing or `null` permission list in the payload is the empty set.
    PermissionSet,
    Permission
);

impl PermissionSet {
    pub fn has_wildcard(&self) -> bool {
        self.contains(WILDCARD_PERMISSION)
    }

    /// See [`has_permission`].
    pub fn grants(&self, name: &str) -> bool {
        has_permission(self, name)
    }
}

/// Decide whether `permissions` grants `name`.
///
/// Granted when `name` is listed or the wildcard is held. Unknown names are
/// simply absent; an empty set grants nothing.
pub fn has_permission(permissions: &PermissionSet, name: &str) -> bool {
    permissions.has_wildcard() || permissions.contains(name)
}
