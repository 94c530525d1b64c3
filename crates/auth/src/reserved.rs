//! Reserved permission and department literals.
//!
//! These strings must match what the backend emits in the session payload.
//! Call sites use the constants, never the literals.

/// Permission granting every permission and every department.
pub const WILDCARD_PERMISSION: &str = "*";

/// Department that is always accessible, regardless of the department list.
pub const UNIVERSAL_DEPARTMENT: &str = "Dashboard";
