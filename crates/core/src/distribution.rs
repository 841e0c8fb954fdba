//! Equipment-kind counts and their merge law.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Count of records per equipment kind, ordered by label.
///
/// Labels are kept verbatim: `"pump"` and `"Pump"` are different kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindDistribution(BTreeMap<String, u64>);

impl KindDistribution {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more record of `kind`.
    pub fn record(&mut self, kind: &str) {
        self.add(kind, 1);
    }

    /// Add `count` records of `kind`.
    pub fn add(&mut self, kind: &str, count: u64) {
        if let Some(slot) = self.0.get_mut(kind) {
            *slot = slot.saturating_add(count);
        } else {
            self.0.insert(kind.to_owned(), count);
        }
    }

    /// Fold `other` into `self`: union of keys, per-key sum.
    pub fn merge(&mut self, other: &Self) {
        for (kind, count) in &other.0 {
            self.add(kind, *count);
        }
    }

    /// Merge without mutating either side.
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }

    #[must_use]
    pub fn get(&self, kind: &str) -> u64 {
        self.0.get(kind).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for KindDistribution {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (kind, count) in iter {
            dist.add(&kind.into(), count);
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_sums_shared_keys_and_unions_the_rest() {
        let a: KindDistribution = [("Pump", 3), ("Reactor", 1)].into_iter().collect();
        let b: KindDistribution = [("Pump", 2), ("Valve", 4)].into_iter().collect();

        let merged = a.merged(&b);

        let expected: KindDistribution =
            [("Pump", 5), ("Reactor", 1), ("Valve", 4)].into_iter().collect();
        assert_eq!(merged, expected);
        assert_eq!(merged.total(), 10);
    }

    #[test]
    fn merge_is_commutative() {
        let a: KindDistribution = [("Pump", 3), ("Reactor", 1)].into_iter().collect();
        let b: KindDistribution = [("Pump", 2), ("Valve", 4)].into_iter().collect();
        assert_eq!(a.clone().merged(&b), b.merged(&a));
    }

    #[test]
    fn merge_is_associative() {
        let a: KindDistribution = [("Pump", 1)].into_iter().collect();
        let b: KindDistribution = [("Valve", 2)].into_iter().collect();
        let c: KindDistribution = [("Pump", 4), ("Mixer", 1)].into_iter().collect();
        let left = a.clone().merged(&b).merged(&c);
        let right = a.merged(&b.merged(&c));
        assert_eq!(left, right);
    }

    #[test]
    fn empty_is_identity() {
        let a: KindDistribution = [("Pump", 3)].into_iter().collect();
        assert_eq!(a.clone().merged(&KindDistribution::new()), a);
        assert_eq!(KindDistribution::new().merged(&a), a);
    }

    #[test]
    fn labels_are_not_normalized() {
        let mut dist = KindDistribution::new();
        dist.record("Pump");
        dist.record("pump");
        dist.record(" Pump");
        assert_eq!(dist.len(), 3);
        assert_eq!(dist.get("Pump"), 1);
    }

    #[test]
    fn serializes_as_plain_object() {
        let dist: KindDistribution = [("Valve", 2), ("Pump", 1)].into_iter().collect();
        let json = serde_json::to_string(&dist).unwrap();
        assert_eq!(json, r#"{"Pump":1,"Valve":2}"#);
        let back: KindDistribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dist);
    }
}
