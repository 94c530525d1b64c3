//! Page guard: never let the shell render a page the user is not entitled to.

use serde::Serialize;

use dashgate_core::PageId;

use crate::config::DeploymentConfig;
use crate::landing::resolve_landing;
use crate::map::NavigationMap;

/// Outcome of checking the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Exempt from the navigation map (deep-link only page).
    Special { page: PageId },

    /// Enabled in the navigation map.
    Enabled { page: PageId },

    /// Not enabled; switch to `to`. Hosts that cannot switch within the
    /// current pass render `safe_view` meanwhile: the deployment fallback
    /// when it is enabled or special, `to` otherwise. Never `from`.
    Redirect {
        from: PageId,
        to: PageId,
        safe_view: PageId,
    },

    /// Not enabled, and resolution lands on the same page (only possible when
    /// nothing is enabled and the page is the fallback). Rendered as is.
    Degenerate { page: PageId },
}

impl GuardDecision {
    /// Page to render in the current pass.
    pub fn view(&self) -> &PageId {
        match self {
            GuardDecision::Special { page }
            | GuardDecision::Enabled { page }
            | GuardDecision::Degenerate { page } => page,
            GuardDecision::Redirect { safe_view, .. } => safe_view,
        }
    }

    /// State update to apply to the current page, if any.
    pub fn correction(&self) -> Option<&PageId> {
        match self {
            GuardDecision::Redirect { to, .. } => Some(to),
            _ => None,
        }
    }

    /// Page the user is entitled to see once any correction is applied.
    pub fn target(&self) -> &PageId {
        self.correction().unwrap_or_else(|| self.view())
    }
}

/// Checks the current page against a deployment's exemptions and a user's map.
#[derive(Debug, Clone, Copy)]
pub struct PageGuard<'a> {
    config: &'a DeploymentConfig,
}

impl<'a> PageGuard<'a> {
    pub fn new(config: &'a DeploymentConfig) -> Self {
        Self { config }
    }

    /// Evaluate `current` against `map`. Total: an empty map means nothing
    /// is enabled and drives the fallback path.
    pub fn evaluate(&self, current: &PageId, map: &NavigationMap) -> GuardDecision {
        if self.config.is_special(current.as_str()) {
            return GuardDecision::Special {
                page: current.clone(),
            };
        }

        if map.is_enabled(current.as_str()) {
            return GuardDecision::Enabled {
                page: current.clone(),
            };
        }

        let landing = resolve_landing(map, self.config.priority(), self.config.fallback());
        if &landing.page == current {
            return GuardDecision::Degenerate {
                page: current.clone(),
            };
        }

        tracing::info!(
            from = %current,
            to = %landing.page,
            source = ?landing.source,
            "page not enabled; redirecting"
        );
        let fallback = self.config.fallback();
        let fallback_renders =
            map.is_enabled(fallback.as_str()) || self.config.is_special(fallback.as_str());
        let safe_view = if fallback_renders {
            fallback.clone()
        } else {
            landing.page.clone()
        };
        GuardDecision::Redirect {
            from: current.clone(),
            to: landing.page,
            safe_view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use proptest::prelude::*;

    fn page(id: &str) -> PageId {
        PageId::parse(id.to_owned()).unwrap()
    }

    fn map(entries: &[(&str, bool)]) -> NavigationMap {
        entries.iter().map(|(p, e)| (page(p), *e)).collect()
    }

    fn config() -> DeploymentConfig {
        DeploymentConfig::builder("test")
            .priority([page("dashboard"), page("parts"), page("rental")])
            .special([page("billing"), page("settings")])
            .build()
            .unwrap()
    }

    #[test]
    fn enabled_page_renders() {
        let config = config();
        let d = PageGuard::new(&config).evaluate(&page("parts"), &map(&[("parts", true)]));
        assert_eq!(d, GuardDecision::Enabled { page: page("parts") });
        assert_eq!(d.correction(), None);
    }

    #[test]
    fn forbidden_page_renders_safe_view_and_schedules_landing() {
        let config = config();
        let d = PageGuard::new(&config).evaluate(&page("rep-comp-admin"), &map(&[("dashboard", true)]));
        assert_eq!(d.view(), &presets::DASHBOARD);
        assert_eq!(d.correction(), Some(&presets::DASHBOARD));
        assert!(matches!(d, GuardDecision::Redirect { ref from, .. } if from == "rep-comp-admin"));
    }

    #[test]
    fn safe_view_is_fallback_even_when_target_differs() {
        let config = config();
        let d = PageGuard::new(&config).evaluate(
            &page("accounting"),
            &map(&[("dashboard", true), ("rental", true)]),
        );
        assert_eq!(d.view(), &presets::DASHBOARD);
        assert_eq!(d.target(), &presets::DASHBOARD);

        let d = PageGuard::new(&config).evaluate(&page("accounting"), &map(&[("rental", true)]));
        assert_eq!(d.view(), &page("rental"));
        assert_eq!(d.target(), &page("rental"));
    }

    #[test]
    fn disabled_fallback_is_never_the_safe_view() {
        let config = config();
        let d = PageGuard::new(&config).evaluate(
            &page("dashboard"),
            &map(&[("dashboard", false), ("parts", true)]),
        );
        assert_eq!(
            d,
            GuardDecision::Redirect {
                from: page("dashboard"),
                to: page("parts"),
                safe_view: page("parts"),
            }
        );
    }

    #[test]
    fn special_page_skips_map_lookup() {
        let config = config();
        let d = PageGuard::new(&config).evaluate(&page("billing"), &NavigationMap::empty());
        assert_eq!(d, GuardDecision::Special { page: page("billing") });
    }

    #[test]
    fn fallback_on_empty_map_is_degenerate_not_a_loop() {
        let config = config();
        let guard = PageGuard::new(&config);
        let d = guard.evaluate(&page("dashboard"), &NavigationMap::empty());
        assert_eq!(d, GuardDecision::Degenerate { page: page("dashboard") });

        let d = guard.evaluate(&page("parts"), &NavigationMap::empty());
        assert_eq!(d.correction(), Some(&page("dashboard")));
    }

    proptest! {
        #[test]
        fn corrected_page_is_stable(
            entries in prop::collection::vec(("[a-z]{1,6}", any::<bool>()), 0..10),
            current in "[a-z]{1,6}",
        ) {
            let config = config();
            let guard = PageGuard::new(&config);
            let m: NavigationMap = entries.iter().map(|(p, e)| (page(p), *e)).collect();

            let first = guard.evaluate(&page(&current), &m);
            if let GuardDecision::Redirect { from, safe_view, .. } = &first {
                prop_assert_ne!(from, safe_view);
            }
            let settled = first.target().clone();
            let second = guard.evaluate(&settled, &m);
            prop_assert_eq!(second.correction(), None);
            prop_assert_eq!(guard.evaluate(&settled, &m), second);
        }

        #[test]
        fn special_pages_always_render(enabled in any::<Option<bool>>()) {
            let config = config();
            let m = match enabled {
                Some(flag) => map(&[("settings", flag)]),
                None => NavigationMap::empty(),
            };
            let d = PageGuard::new(&config).evaluate(&page("settings"), &m);
            prop_assert_eq!(d.view(), &page("settings"));
            prop_assert_eq!(d.correction(), None);
        }
    }
}
