//! Server-computed navigation descriptor embedded in the user record.
//!
//! The descriptor maps page identifiers to whatever the backend decided to
//! send for that page (a flag, an object with labels and icons, ...). Its
//! shape is owned by the backend; this side only tests each value for
//! truthiness and keeps the keys in the order the server sent them.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered `(page key, value)` pairs from the session payload.
///
/// Anything that is not a JSON object (missing, `null`, an array, a scalar)
/// deserializes to an empty descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationDescriptor {
    entries: Vec<(String, Value)>,
}

impl NavigationDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append or overwrite a key. An overwritten key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Entries in server insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for NavigationDescriptor {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut descriptor = Self::new();
        for (key, value) in iter {
            descriptor.insert(key, value);
        }
        descriptor
    }
}

/// JavaScript-style truthiness of a descriptor value.
///
/// Falsy: `false`, `null`, `0`, `-0`, `""`. Everything else is truthy,
/// including empty arrays and empty objects.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl Serialize for NavigationDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NavigationDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DescriptorVisitor)
    }
}

struct DescriptorVisitor;

impl<'de> Visitor<'de> for DescriptorVisitor {
    type Value = NavigationDescriptor;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a navigation descriptor object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut descriptor = NavigationDescriptor::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            descriptor.insert(key, value);
        }
        Ok(descriptor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        while access.next_element::<IgnoredAny>()?.is_some() {}
        Ok(NavigationDescriptor::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(NavigationDescriptor::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(NavigationDescriptor::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(NavigationDescriptor::new())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(NavigationDescriptor::new())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(NavigationDescriptor::new())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(NavigationDescriptor::new())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(NavigationDescriptor::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_server_insertion_order() {
        let d: NavigationDescriptor =
            serde_json::from_str(r#"{"rental": true, "dashboard": true, "accounting": false}"#)
                .unwrap();
        let keys: Vec<&str> = d.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["rental", "dashboard", "accounting"]);
    }

    #[test]
    fn order_survives_an_intermediate_value() {
        let value: Value =
            serde_json::from_str(r#"{"zoom-analytics": true, "hubspot-sync": true}"#).unwrap();
        let d: NavigationDescriptor = serde_json::from_value(value).unwrap();
        let keys: Vec<&str> = d.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zoom-analytics", "hubspot-sync"]);

        let d: NavigationDescriptor =
            serde_json::from_value(json!({"vital-overview": true, "dashboard": true})).unwrap();
        assert_eq!(d.iter().next().map(|(k, _)| k), Some("vital-overview"));
    }

    #[test]
    fn duplicate_key_keeps_first_position_and_last_value() {
        let d: NavigationDescriptor =
            serde_json::from_str(r#"{"parts": false, "service": 1, "parts": {"label": "Parts"}}"#)
                .unwrap();
        let keys: Vec<&str> = d.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["parts", "service"]);
        assert_eq!(d.get("parts"), Some(&json!({"label": "Parts"})));
    }

    #[test]
    fn non_object_payloads_are_empty() {
        for raw in ["null", "[1, 2]", "true", "\"dashboard\"", "7"] {
            let d: NavigationDescriptor = serde_json::from_str(raw).unwrap();
            assert!(d.is_empty(), "{raw} should yield an empty descriptor");
        }
    }

    #[test]
    fn truthiness_follows_javascript() {
        for v in [json!(null), json!(false), json!(0), json!(-0.0), json!("")] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
        for v in [json!(true), json!(1), json!(-2.5), json!("x"), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn serializes_in_insertion_order() {
        let d: NavigationDescriptor = [("zoom", json!(true)), ("dashboard", json!(true))]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_string(&d).unwrap(),
            r#"{"zoom":true,"dashboard":true}"#
        );
    }
}
