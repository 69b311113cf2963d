use crate::scalar::Scalar;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Metric name → value, kept in the order the caller supplied it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsMapping {
    entries: Vec<(String, Scalar)>,
}

impl StatisticsMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. A repeated key replaces the earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rows as rendered: title-cased metric name and stringified value.
    pub fn display_rows(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.iter().map(|(k, v)| (title_case(k), v.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for StatisticsMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = StatisticsMapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl<'de> Deserialize<'de> for StatisticsMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = StatisticsMapping;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of metric names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut mapping = StatisticsMapping::new();
                while let Some((key, value)) = access.next_entry::<String, Scalar>()? {
                    mapping.insert(key, value);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// `success_rate` → `Success Rate`.
pub fn title_case(key: &str) -> String {
    key.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
