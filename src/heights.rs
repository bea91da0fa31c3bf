use alloc::vec::Vec;

use crate::key::{KeyHeightMap, ListKey};

/// Measured item heights, keyed by item identity.
///
/// Entries are only ever written by measurement reports. Keys that disappear from the data set
/// keep their entry until it is overwritten or the whole cache is replaced.
#[derive(Clone, Debug)]
pub struct HeightCache<K> {
    heights: KeyHeightMap<K>,
    version: u64,
}

impl<K: ListKey> Default for HeightCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ListKey> HeightCache<K> {
    pub fn new() -> Self {
        Self {
            heights: KeyHeightMap::<K>::new(),
            version: 0,
        }
    }

    /// Records the measured height for `key`. The latest report wins.
    ///
    /// Returns `true` when the cache changed. Non-finite or negative heights are rejected and
    /// leave the cache untouched.
    pub fn report(&mut self, key: K, height: f64) -> bool {
        if !height.is_finite() || height < 0.0 {
            vwarn!(height, "HeightCache: rejected measurement");
            return false;
        }
        match self.heights.get_mut(&key) {
            Some(cur) if *cur == height => false,
            Some(cur) => {
                *cur = height;
                self.version = self.version.wrapping_add(1);
                true
            }
            None => {
                self.heights.insert(key, height);
                self.version = self.version.wrapping_add(1);
                true
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.heights.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.heights.contains_key(key)
    }

    /// Height for `key`, or `estimate` when it has never been measured.
    pub fn height_or(&self, key: &K, estimate: f64) -> f64 {
        self.get(key).unwrap_or(estimate)
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Change counter; bumps once per report that actually altered a height.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn clear(&mut self) {
        if self.heights.is_empty() {
            return;
        }
        self.heights.clear();
        self.version = self.version.wrapping_add(1);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.heights.iter().map(|(k, v)| (k, *v))
    }

    /// Exports the cached heights (useful for persistence across sessions).
    pub fn export(&self) -> Vec<(K, f64)>
    where
        K: Clone,
    {
        let mut out = Vec::with_capacity(self.heights.len());
        for (k, v) in self.iter() {
            out.push((k.clone(), v));
        }
        out
    }

    /// Replaces the cache contents from an iterator of `(key, height)` pairs.
    pub fn import(&mut self, entries: impl IntoIterator<Item = (K, f64)>) {
        self.heights.clear();
        let mut n = 0usize;
        for (k, v) in entries {
            if v.is_finite() && v >= 0.0 {
                self.heights.insert(k, v);
                n = n.saturating_add(1);
            }
        }
        vdebug!(entries = n, "HeightCache::import");
        self.version = self.version.wrapping_add(1);
    }
}
