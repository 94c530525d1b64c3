//! Landing page resolution.

use serde::Serialize;

use dashgate_core::PageId;

use crate::config::DeploymentConfig;
use crate::map::NavigationMap;

/// Which rule picked the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingSource {
    /// First enabled page of the priority list.
    Priority,
    /// No priority page enabled; first enabled page in map order.
    FirstEnabled,
    /// Nothing enabled at all; the deployment fallback, unvalidated.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Landing {
    pub page: PageId,
    pub source: LandingSource,
}

/// Pick the landing page.
///
/// 1. the first page of `priority` that is enabled in `map`;
/// 2. otherwise the first enabled page in map insertion order;
/// 3. otherwise `fallback`, even though it is not enabled.
///
/// Step 3 does not re-check the fallback. Whether a user with zero enabled
/// pages should still land on the dashboard is unresolved; the case is
/// reported as [`LandingSource::Fallback`] for callers to log.
pub fn resolve_landing(map: &NavigationMap, priority: &[PageId], fallback: &PageId) -> Landing {
    if let Some(page) = priority.iter().find(|p| map.is_enabled(p.as_str())) {
        return Landing {
            page: page.clone(),
            source: LandingSource::Priority,
        };
    }

    if let Some(page) = map.first_enabled() {
        return Landing {
            page: page.clone(),
            source: LandingSource::FirstEnabled,
        };
    }

    tracing::debug!(
        fallback = %fallback,
        known_pages = map.len(),
        "no enabled pages in navigation map; landing on fallback"
    );
    Landing {
        page: fallback.clone(),
        source: LandingSource::Fallback,
    }
}

/// [`resolve_landing`] returning only the page.
pub fn resolve_landing_page(map: &NavigationMap, priority: &[PageId], fallback: &PageId) -> PageId {
    resolve_landing(map, priority, fallback).page
}

impl DeploymentConfig {
    /// Resolve the landing page with this deployment's priority list and fallback.
    pub fn resolve_landing(&self, map: &NavigationMap) -> Landing {
        resolve_landing(map, self.priority(), self.fallback())
    }
}
