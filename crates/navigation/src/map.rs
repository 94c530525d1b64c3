//! Navigation map: the single source of truth for "is page X enabled".

use std::collections::HashMap;

use dashgate_auth::{User, is_truthy};
use dashgate_core::PageId;

/// One page key from the navigation descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub page: PageId,
    pub enabled: bool,
}

/// Page id → enabled flag, in server insertion order.
///
/// Built once per user record with [`NavigationMap::build`] and rebuilt
/// (never patched) whenever the user record is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationMap {
    entries: Vec<NavEntry>,
    index: HashMap<PageId, usize>,
}

impl NavigationMap {
    /// Map with no entries; what an absent or malformed descriptor yields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Derive the map from the descriptor embedded in `user`.
    ///
    /// Only `user.navigation` is read: which pages a permission unlocks is
    /// decided by the backend, not re-derived here. Keys are taken verbatim;
    /// only an empty key is skipped.
    pub fn build(user: &User) -> Self {
        let mut map = Self::empty();
        for (key, value) in user.navigation.iter() {
            match PageId::from_key(key.to_owned()) {
                Ok(page) => map.push(page, is_truthy(value)),
                Err(err) => {
                    tracing::debug!(user_id = %user.id, key, error = %err, "skipping navigation key");
                }
            }
        }
        tracing::debug!(
            user_id = %user.id,
            pages = map.len(),
            enabled = map.enabled_count(),
            "built navigation map"
        );
        map
    }

    fn push(&mut self, page: PageId, enabled: bool) {
        // A repeated page keeps its first position and takes the latest flag.
        if let Some(&i) = self.index.get(&page) {
            self.entries[i].enabled = enabled;
            return;
        }
        self.index.insert(page.clone(), self.entries.len());
        self.entries.push(NavEntry { page, enabled });
    }

    pub fn is_enabled(&self, page: &str) -> bool {
        self.index
            .get(page)
            .is_some_and(|&i| self.entries[i].enabled)
    }

    /// Whether the descriptor mentioned `page` at all, enabled or not.
    pub fn contains(&self, page: &str) -> bool {
        self.index.contains_key(page)
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Enabled pages in insertion order (menu order).
    pub fn enabled_pages(&self) -> impl Iterator<Item = &PageId> {
        self.entries.iter().filter(|e| e.enabled).map(|e| &e.page)
    }

    pub fn first_enabled(&self) -> Option<&PageId> {
        self.enabled_pages().next()
    }

    pub fn enabled_count(&self) -> usize {
        self.entries.iter().filter(|e| e.enabled).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PageId, bool)> for NavigationMap {
    fn from_iter<I: IntoIterator<Item = (PageId, bool)>>(iter: I) -> Self {
        let mut map = Self::empty();
        for (page, enabled) in iter {
            map.push(page, enabled);
        }
        map
    }
}

/// See [`NavigationMap::build`].
pub fn build_navigation_map(user: &User) -> NavigationMap {
    NavigationMap::build(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashgate_auth::NavigationDescriptor;
    use dashgate_core::UserId;
    use proptest::prelude::*;
    use serde_json::{Value, json};

    fn user_with(navigation: Value) -> User {
        let navigation: NavigationDescriptor = serde_json::from_value(navigation).unwrap();
        User::new(UserId::new("u-1")).with_navigation(navigation)
    }

    #[test]
    fn truthy_values_are_enabled() {
        let map = NavigationMap::build(&user_with(json!({
            "dashboard": {"label": "Dashboard"},
            "parts": true,
            "rental": false,
            "service": null,
            "accounting": 0
        })));
        assert!(map.is_enabled("dashboard"));
        assert!(map.is_enabled("parts"));
        assert!(!map.is_enabled("rental"));
        assert!(map.contains("rental"));
        assert!(!map.contains("zoom"));
        assert_eq!(map.enabled_count(), 2);
    }

    #[test]
    fn keys_are_taken_verbatim() {
        let map = NavigationMap::build(&user_with(json!({"": true, "Rep Comp": true, "parts": false})));
        assert_eq!(map.len(), 2);
        assert!(!map.contains(""));
        assert!(map.is_enabled("Rep Comp"));
        assert_eq!(map.first_enabled().map(PageId::as_str), Some("Rep Comp"));
    }

    #[test]
    fn malformed_navigation_builds_empty_map() {
        let map = NavigationMap::build(&user_with(json!(["dashboard"])));
        assert!(map.is_empty());
        assert_eq!(map.first_enabled(), None);
    }

    #[test]
    fn enabled_pages_keep_server_order() {
        let user: User = serde_json::from_str(
            r#"{
                "id": "0190c2a4-7b1e-7cc0-8a55-4f1d2b3c4d5e",
                "navigation": {"zoom": true, "rental": false, "accounting": true, "dashboard": true}
            }"#,
        )
        .unwrap();
        let map = build_navigation_map(&user);
        let order: Vec<&str> = map.enabled_pages().map(PageId::as_str).collect();
        assert_eq!(order, ["zoom", "accounting", "dashboard"]);
    }

    proptest! {
        #[test]
        fn build_is_deterministic(
            pages in prop::collection::vec(("[a-z][a-z-]{0,10}", any::<bool>()), 0..12),
        ) {
            let descriptor: NavigationDescriptor =
                pages.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
            let user = User::new(UserId::new("u-1")).with_navigation(descriptor);
            let first = NavigationMap::build(&user);
            let second = NavigationMap::build(&user);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.entries(), second.entries());
        }
    }
}
