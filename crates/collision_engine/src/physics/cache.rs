//! Per-shape memo of current collisions
//!
//! The cache is not ground truth. It only lets movement validation tell an
//! overlap that already existed before a move (tolerated) from one the move
//! would introduce (rejected). Entries are meant to be symmetric, but each
//! mover updates them one side at a time.

use crate::foundation::collections::ShapeHandle;
use std::collections::{HashMap, HashSet};

/// Map from a shape to the shapes it was last known to collide with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionCache {
    entries: HashMap<ShapeHandle, HashSet<ShapeHandle>>,
}

impl CollisionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes `handle` is known to collide with
    pub fn get(&self, handle: ShapeHandle) -> Option<&HashSet<ShapeHandle>> {
        self.entries.get(&handle)
    }

    /// Owned copy of the entry, empty when there is none
    pub fn colliding_with(&self, handle: ShapeHandle) -> HashSet<ShapeHandle> {
        self.entries.get(&handle).cloned().unwrap_or_default()
    }

    /// Whether `handle`'s entry lists `other`
    pub fn contains(&self, handle: ShapeHandle, other: ShapeHandle) -> bool {
        self.entries.get(&handle).is_some_and(|set| set.contains(&other))
    }

    /// Replace `handle`'s entry; an empty set removes it
    pub fn replace(&mut self, handle: ShapeHandle, collisions: HashSet<ShapeHandle>) {
        if collisions.is_empty() {
            self.entries.remove(&handle);
        } else {
            self.entries.insert(handle, collisions);
        }
    }

    /// Record a collision on both sides
    pub fn record_pair(&mut self, a: ShapeHandle, b: ShapeHandle) {
        self.entries.entry(a).or_default().insert(b);
        self.entries.entry(b).or_default().insert(a);
    }

    /// Remove `other` from `handle`'s entry
    pub fn release(&mut self, handle: ShapeHandle, other: ShapeHandle) {
        if let Some(set) = self.entries.get_mut(&handle) {
            set.remove(&other);
            if set.is_empty() {
                self.entries.remove(&handle);
            }
        }
    }

    /// Drop `handle` entirely: its own entry and every mention of it
    pub fn forget(&mut self, handle: ShapeHandle) {
        let partners = self.entries.remove(&handle).unwrap_or_default();
        for other in partners {
            self.release(other, handle);
        }
        // one-sided entries that still point at the shape
        self.entries.retain(|_, set| {
            set.remove(&handle);
            !set.is_empty()
        });
    }

    /// Number of shapes with at least one cached collision
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no collisions are cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::HandleMap;

    fn handles(count: usize) -> Vec<ShapeHandle> {
        let mut map: HandleMap<()> = HandleMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_record_pair_is_symmetric() {
        let h = handles(2);
        let mut cache = CollisionCache::new();
        cache.record_pair(h[0], h[1]);

        assert!(cache.contains(h[0], h[1]));
        assert!(cache.contains(h[1], h[0]));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_release_drops_empty_entries() {
        let h = handles(2);
        let mut cache = CollisionCache::new();
        cache.record_pair(h[0], h[1]);

        cache.release(h[0], h[1]);
        assert!(cache.get(h[0]).is_none());
        assert!(cache.contains(h[1], h[0]));
    }

    #[test]
    fn test_replace_with_empty_set_removes_entry() {
        let h = handles(2);
        let mut cache = CollisionCache::new();
        cache.record_pair(h[0], h[1]);
        cache.replace(h[0], HashSet::new());

        assert!(cache.get(h[0]).is_none());
        assert!(cache.colliding_with(h[0]).is_empty());
    }

    #[test]
    fn test_forget_removes_every_mention() {
        let h = handles(3);
        let mut cache = CollisionCache::new();
        cache.record_pair(h[0], h[1]);
        cache.record_pair(h[0], h[2]);
        cache.record_pair(h[1], h[2]);

        cache.forget(h[0]);

        assert!(cache.get(h[0]).is_none());
        assert!(!cache.contains(h[1], h[0]));
        assert!(!cache.contains(h[2], h[0]));
        assert!(cache.contains(h[1], h[2]));
    }
}
