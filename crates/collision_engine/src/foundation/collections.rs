//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generational handle to a shape stored in a scene's arena.
    ///
    /// The spatial index and collision cache only ever hold handles, so a
    /// removed shape leaves stale keys that fail lookup instead of dangling.
    pub struct ShapeHandle;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<ShapeHandle, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_handle_is_not_reused() {
        let mut map: HandleMap<u32> = HandleMap::with_key();
        let first = map.insert(1);
        map.remove(first);
        let second = map.insert(2);

        assert_ne!(first, second);
        assert!(map.get(first).is_none());
        assert_eq!(map.get(second), Some(&2));
    }
}
