//! Per-owner retention window.
//!
//! The store only decides *which rows* to delete; the survivor/evicted split
//! is computed here so it can be checked without a database.

use std::num::NonZeroUsize;

use crate::constants::DEFAULT_RETENTION_BOUND;

/// Keep-newest-`N` policy applied after every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    bound: NonZeroUsize,
}

/// Outcome of applying a [`RetentionPolicy`] to one owner's summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eviction<T> {
    /// Entries that stay, oldest first.
    pub survivors: Vec<T>,
    /// Entries to hard-delete, oldest first.
    pub evicted: Vec<T>,
}

impl RetentionPolicy {
    #[must_use]
    pub const fn new(bound: NonZeroUsize) -> Self {
        Self { bound }
    }

    /// Maximum number of summaries retained per owner.
    #[must_use]
    pub const fn bound(&self) -> usize {
        self.bound.get()
    }

    /// Split `oldest_first` into survivors and evictees.
    ///
    /// Input must already be sorted ascending by (`created_at`, id). The last
    /// `bound` entries survive; everything before them is evicted.
    #[must_use]
    pub fn evict<T>(&self, mut oldest_first: Vec<T>) -> Eviction<T> {
        let excess = oldest_first.len().saturating_sub(self.bound());
        let survivors = oldest_first.split_off(excess);
        Eviction { survivors, evicted: oldest_first }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_RETENTION_BOUND).unwrap_or(NonZeroUsize::MIN))
    }
}

impl std::fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "keep newest {}", self.bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(n: usize) -> RetentionPolicy {
        RetentionPolicy::new(NonZeroUsize::new(n).unwrap())
    }

    #[test]
    fn under_bound_keeps_everything() {
        let out = policy(5).evict(vec![1, 2, 3]);
        assert_eq!(out.survivors, vec![1, 2, 3]);
        assert!(out.evicted.is_empty());
    }

    #[test]
    fn exactly_at_bound_keeps_everything() {
        let out = policy(3).evict(vec![1, 2, 3]);
        assert_eq!(out.survivors, vec![1, 2, 3]);
        assert!(out.evicted.is_empty());
    }

    #[test]
    fn over_bound_evicts_oldest_first() {
        let out = policy(5).evict((1..=7).collect());
        assert_eq!(out.survivors, vec![3, 4, 5, 6, 7]);
        assert_eq!(out.evicted, vec![1, 2]);
    }

    #[test]
    fn bound_of_one_keeps_newest_only() {
        let out = policy(1).evict(vec!["a", "b", "c"]);
        assert_eq!(out.survivors, vec!["c"]);
        assert_eq!(out.evicted, vec!["a", "b"]);
    }

    #[test]
    fn survivors_never_exceed_bound() {
        let p = policy(4);
        for len in 0..12 {
            let out = p.evict((0..len).collect::<Vec<_>>());
            assert_eq!(out.survivors.len(), len.min(4));
            assert_eq!(out.survivors.len() + out.evicted.len(), len);
        }
    }

    #[test]
    fn default_bound_is_five() {
        assert_eq!(RetentionPolicy::default().bound(), 5);
    }
}
