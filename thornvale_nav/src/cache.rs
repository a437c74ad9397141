// Build-once cache of navigation grids, keyed by map id.
//
// Grids are expensive to build and immutable afterwards, so each map's grid
// is constructed on first use and shared read-only (`Arc`) across every
// entity and query on that map. The cache is an explicit object owned by
// whoever owns map lifecycle (each movement orchestrator owns one) — no
// process-wide statics, no lazy initialization magic. Map reloads call
// `invalidate` and the next request rebuilds.
//
// Single-writer by construction: the orchestrator runs on one logical
// thread, writes a key at most once between invalidations, and hands out
// clones of the `Arc` for reading.

use crate::types::MapId;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Map-keyed store of immutable, shared navigation grids.
#[derive(Debug, Default)]
pub struct GridCache<G> {
    grids: FxHashMap<MapId, Arc<G>>,
}

impl<G> GridCache<G> {
    pub fn new() -> Self {
        Self {
            grids: FxHashMap::default(),
        }
    }

    /// The cached grid for a map, if one has been built.
    pub fn get(&self, map: MapId) -> Option<Arc<G>> {
        self.grids.get(&map).cloned()
    }

    /// Store a freshly built grid and hand back the shared reference.
    /// Replaces any previous grid for the key (only expected after
    /// `invalidate`).
    pub fn insert(&mut self, map: MapId, grid: G) -> Arc<G> {
        let shared = Arc::new(grid);
        self.grids.insert(map, Arc::clone(&shared));
        shared
    }

    /// Drop the grid for a reloaded map. Returns whether one was cached.
    /// Outstanding `Arc`s keep the old grid alive until their holders finish
    /// with it; new requests see the rebuilt one.
    pub fn invalidate(&mut self, map: MapId) -> bool {
        self.grids.remove(&map).is_some()
    }

    pub fn contains(&self, map: MapId) -> bool {
        self.grids.contains_key(&map)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_get_returns_the_same_grid() {
        let mut cache: GridCache<Vec<bool>> = GridCache::new();
        let map = MapId(3);
        assert!(cache.get(map).is_none());
        let first = cache.insert(map, vec![true, false]);
        let second = cache.get(map).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_forces_a_rebuild() {
        let mut cache: GridCache<u32> = GridCache::new();
        let map = MapId(7);
        let old = cache.insert(map, 1);
        assert!(cache.invalidate(map));
        assert!(!cache.contains(map));
        assert!(!cache.invalidate(map)); // second invalidate is a no-op
        let new = cache.insert(map, 2);
        assert!(!Arc::ptr_eq(&old, &new));
        assert_eq!(*old, 1); // outstanding handle still reads the old grid
        assert_eq!(*new, 2);
    }

    #[test]
    fn keys_are_independent() {
        let mut cache: GridCache<u32> = GridCache::new();
        cache.insert(MapId(1), 10);
        cache.insert(MapId(2), 20);
        cache.invalidate(MapId(1));
        assert!(!cache.contains(MapId(1)));
        assert_eq!(*cache.get(MapId(2)).unwrap(), 20);
    }
}
