//! Unordered, unique collections of opaque names (permissions, departments).

/// Generates a set newtype over `HashSet<$item>` with the payload semantics
/// shared by permissions and departments:
///
/// - deserializes from a JSON array; `null` yields the empty set
/// - serializes as a sorted array (stable output for logs and snapshots)
/// - membership is tested by `&str`
macro_rules! name_set {
    ($(#[$meta:meta])* $set:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $set(std::collections::HashSet<$item>);

        impl $set {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn contains(&self, name: &str) -> bool {
                self.0.contains(name)
            }

            pub fn insert(&mut self, item: $item) -> bool {
                self.0.insert(item)
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn iter(&self) -> impl Iterator<Item = &$item> {
                self.0.iter()
            }

            /// Members sorted by name.
            pub fn sorted(&self) -> Vec<&$item> {
                let mut items: Vec<&$item> = self.0.iter().collect();
                items.sort_by(|a, b| a.as_str().cmp(b.as_str()));
                items
            }
        }

        impl From<Option<Vec<$item>>> for $set {
            fn from(value: Option<Vec<$item>>) -> Self {
                value.into_iter().flatten().collect()
            }
        }

        impl serde::Serialize for $set {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_seq(self.sorted())
            }
        }

        impl<'de> serde::Deserialize<'de> for $set {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let items: Option<Vec<$item>> = serde::Deserialize::deserialize(deserializer)?;
                Ok(items.into())
            }
        }

        impl FromIterator<$item> for $set {
            fn from_iter<I: IntoIterator<Item = $item>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl<'a> FromIterator<&'a str> for $set {
            fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
                iter.into_iter().map(|s| <$item>::new(s.to_owned())).collect()
            }
        }
    };
}
