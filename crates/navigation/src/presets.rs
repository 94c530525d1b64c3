//! Built-in deployments and the page identifiers they reference.
//!
//! Page ids must match the keys the backend emits in `user.navigation`.

use dashgate_core::PageId;

use crate::config::DeploymentConfig;

pub const STANDARD: &str = "standard";
pub const VITAL: &str = "vital";
pub const CORE: &str = "core";

// === Core departments ===

pub const DASHBOARD: PageId = PageId::from_static("dashboard");
pub const SERVICE: PageId = PageId::from_static("service");
pub const PARTS: PageId = PageId::from_static("parts");
pub const RENTAL: PageId = PageId::from_static("rental");
pub const ACCOUNTING: PageId = PageId::from_static("accounting");
pub const CUSTOMERS: PageId = PageId::from_static("customers");
pub const REP_COMP_ADMIN: PageId = PageId::from_static("rep-comp-admin");

// === Integrations ===

pub const HUBSPOT: PageId = PageId::from_static("hubspot");
pub const QUICKBOOKS: PageId = PageId::from_static("quickbooks");
pub const ZOOM: PageId = PageId::from_static("zoom");

// === Vital analytics ===

pub const VITAL_OVERVIEW: PageId = PageId::from_static("vital-overview");
pub const VITAL_SERVICE: PageId = PageId::from_static("vital-service");
pub const VITAL_PARTS: PageId = PageId::from_static("vital-parts");
pub const VITAL_CUSTOMER_DETAIL: PageId = PageId::from_static("vital-customer-detail");
pub const VITAL_WORK_ORDER_DETAIL: PageId = PageId::from_static("vital-work-order-detail");

// === Deep-link only ===

pub const BILLING: PageId = PageId::from_static("billing");
pub const SETTINGS: PageId = PageId::from_static("settings");

/// Every department and integration page.
pub fn standard() -> DeploymentConfig {
    build(
        STANDARD,
        [
            DASHBOARD, SERVICE, PARTS, RENTAL, ACCOUNTING, CUSTOMERS, HUBSPOT, QUICKBOOKS, ZOOM,
            REP_COMP_ADMIN,
        ],
        [BILLING, SETTINGS],
    )
}

/// Standard departments plus the `vital-*` analytics suite.
pub fn vital() -> DeploymentConfig {
    build(
        VITAL,
        [
            DASHBOARD, VITAL_OVERVIEW, VITAL_SERVICE, VITAL_PARTS, SERVICE, PARTS, RENTAL,
            ACCOUNTING, CUSTOMERS,
        ],
        [BILLING, SETTINGS, VITAL_CUSTOMER_DETAIL, VITAL_WORK_ORDER_DETAIL],
    )
}

/// Core departments only.
pub fn core() -> DeploymentConfig {
    build(
        CORE,
        [DASHBOARD, SERVICE, PARTS, RENTAL, ACCOUNTING],
        [BILLING, SETTINGS],
    )
}

fn build<const P: usize, const S: usize>(
    name: &str,
    priority: [PageId; P],
    special: [PageId; S],
) -> DeploymentConfig {
    DeploymentConfig::from_trusted_parts(name, priority.into(), special.into_iter().collect(), DASHBOARD)
}
