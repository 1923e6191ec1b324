// Copyright 2025 the Sagger Authors
// SPDX-License-Identifier: Apache-2.0

//! Per-line cache of computed sag offsets.
//!
//! Entries are keyed by line index and validated on every read: an entry
//! whose length or weight no longer matches the line it is read for is a
//! miss and gets recomputed in place. Any text, weight or style change
//! clears the whole cache.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::{Line, OffsetArray};

/// Hit/miss counters, reset by [`OffsetCache::invalidate_all`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

#[derive(Clone, Debug, Default)]
pub struct OffsetCache {
    entries: HashMap<usize, OffsetArray>,
    stats: CacheStats,
}

impl OffsetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw lookup without validation.
    pub fn get(&self, line_id: usize) -> Option<&OffsetArray> {
        self.entries.get(&line_id)
    }

    /// Lookup that only returns an entry still valid for `line` at `weight`.
    pub fn get_valid(&self, line: &Line, weight: f64) -> Option<&OffsetArray> {
        self.entries
            .get(&line.id)
            .filter(|offsets| offsets.is_valid_for(line, weight))
    }

    pub fn put(&mut self, line_id: usize, offsets: OffsetArray) {
        self.entries.insert(line_id, offsets);
    }

    /// Return the valid entry for `line`, recomputing it with `compute` if it
    /// is missing or stale.
    pub fn resolve(
        &mut self,
        line: &Line,
        weight: f64,
        compute: impl FnOnce() -> OffsetArray,
    ) -> &OffsetArray {
        match self.entries.entry(line.id) {
            Entry::Occupied(mut entry) => {
                if entry.get().is_valid_for(line, weight) {
                    self.stats.hits += 1;
                } else {
                    tracing::debug!(
                        "Stale offsets for line {} ({} cached, {} chars)",
                        line.id,
                        entry.get().len(),
                        line.len()
                    );
                    self.stats.misses += 1;
                    entry.insert(compute());
                }
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                entry.insert(compute())
            }
        }
    }

    /// Drop every entry.
    pub fn invalidate_all(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!("Invalidating {} cached lines", self.entries.len());
        }
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Deepest offset among all cached lines.
    pub fn max_offset(&self) -> f64 {
        self.entries
            .values()
            .map(OffsetArray::max_offset)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets_for(line: &Line, weight: f64) -> OffsetArray {
        let values = (0..line.len()).map(|i| i as f64 * weight).collect();
        OffsetArray::new(values, line.len() as f64 * 10.0, weight)
    }

    #[test]
    fn test_resolve_miss_then_hit() {
        let mut cache = OffsetCache::new();
        let line = Line::new(0, "abc");

        let first = cache.resolve(&line, 1.0, || offsets_for(&line, 1.0)).clone();
        let second = cache
            .resolve(&line, 1.0, || panic!("valid entry must not be recomputed"))
            .clone();

        assert_eq!(first, second);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_length_mismatch_is_recomputed() {
        let mut cache = OffsetCache::new();
        let before = Line::new(3, "abc");
        cache.put(3, offsets_for(&before, 1.0));

        let after = Line::new(3, "abcd");
        assert!(cache.get_valid(&after, 1.0).is_none());

        let resolved = cache.resolve(&after, 1.0, || offsets_for(&after, 1.0));
        assert_eq!(resolved.len(), 4);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_weight_mismatch_is_recomputed() {
        let mut cache = OffsetCache::new();
        let line = Line::new(0, "abc");
        cache.put(0, offsets_for(&line, 1.0));

        assert!(cache.get_valid(&line, 2.0).is_none());
        let resolved = cache.resolve(&line, 2.0, || offsets_for(&line, 2.0));
        assert_eq!(resolved.weight(), 2.0);
    }

    #[test]
    fn test_invalidate_all_empties_cache() {
        let mut cache = OffsetCache::new();
        for id in 0..4 {
            let line = Line::new(id, "xy");
            cache.resolve(&line, 1.0, || offsets_for(&line, 1.0));
        }
        assert_eq!(cache.len(), 4);

        cache.invalidate_all();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_max_offset_over_lines() {
        let mut cache = OffsetCache::new();
        assert_eq!(cache.max_offset(), 0.0);
        cache.put(0, OffsetArray::new(vec![0.0, 2.5], 20.0, 1.0));
        cache.put(1, OffsetArray::new(vec![0.0, 7.0, 1.0], 30.0, 1.0));
        assert_eq!(cache.max_offset(), 7.0);
    }
}
