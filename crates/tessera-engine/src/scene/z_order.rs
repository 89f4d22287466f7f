use std::collections::{BTreeSet, HashMap};

use super::{ElementId, ZIndex, ZOrderKey};

/// Ordered index of elements by z-index.
///
/// Performance characteristics:
/// - `insert` / `remove` / `reposition` are O(log n)
/// - paint-order iteration is O(n) with no per-frame sort
///
/// Keys are snapshots. Changing an element's z requires an explicit
/// [`reposition`](Self::reposition) (remove + reinsert); mutating the z of an element
/// already stored is never detected and leaves it in its old slot.
#[derive(Debug, Default)]
pub struct ZOrder {
    keys: BTreeSet<ZOrderKey>,
    by_id: HashMap<ElementId, ZOrderKey>,
    next_seq: u64,
}

impl ZOrder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: ElementId) -> bool {
        self.by_id.contains_key(&id)
    }

    #[inline]
    pub fn key_of(&self, id: ElementId) -> Option<ZOrderKey> {
        self.by_id.get(&id).copied()
    }

    /// Inserts `id` at `z`, after every element already at the same z.
    ///
    /// Inserting an id that is already present moves it (same as `reposition`).
    pub fn insert(&mut self, id: ElementId, z: ZIndex) -> ZOrderKey {
        self.remove(id);

        let key = ZOrderKey::new(z, self.next_seq, id);
        self.next_seq += 1;
        self.keys.insert(key);
        self.by_id.insert(id, key);
        key
    }

    pub fn remove(&mut self, id: ElementId) -> Option<ZOrderKey> {
        let key = self.by_id.remove(&id)?;
        self.keys.remove(&key);
        Some(key)
    }

    /// Re-establishes `id` under a new z. Returns `false` if `id` is unknown.
    ///
    /// The element counts as newly inserted among its new z peers.
    pub fn reposition(&mut self, id: ElementId, z: ZIndex) -> bool {
        if self.remove(id).is_none() {
            return false;
        }
        self.insert(id, z);
        true
    }

    /// Ids in paint order (back-to-front).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = ElementId> + '_ {
        self.keys.iter().map(|k| k.id)
    }

    /// Keys in paint order (back-to-front).
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &ZOrderKey> + '_ {
        self.keys.iter()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.by_id.clear();
    }
}
