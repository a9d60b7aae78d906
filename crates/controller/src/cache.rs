use fuel_core::CarId;
use fuel_sampling::SamplingData;
use std::collections::HashMap;
use std::sync::Arc;

/// Identifies one cached chart of a controller.  The statistic kind is fixed
/// per controller and therefore not part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub car: CarId,
    pub months: u32,
}

/// Epoch of valid computations.  Results computed under an older generation
/// are dropped on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Discardable statistics content.  A miss only ever means "recompute".
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: HashMap<CacheKey, Arc<SamplingData>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<SamplingData>> {
        self.entries.get(key).cloned()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: CacheKey, data: Arc<SamplingData>) {
        self.entries.insert(key, data);
    }

    /// Drop every entry of `car`; returns how many went.
    pub fn remove_car(&mut self, car: CarId) -> usize {
        self.purge(|k| k.car != car)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Evict every entry for which `keep` is false; returns how many went.
    pub fn purge(&mut self, keep: impl Fn(&CacheKey) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| keep(k));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
