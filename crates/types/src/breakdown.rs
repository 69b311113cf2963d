use std::collections::BTreeMap;

/// Label applied to records without a category.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Record counts per category label, iterated in lexicographic label order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    counts: BTreeMap<String, usize>,
}

impl CategoryBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.counts.get(label).copied()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
