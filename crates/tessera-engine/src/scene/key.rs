use core::cmp::Ordering;

use super::{ElementId, ZIndex};

/// Ordering key for an element in a [`ZOrder`](super::ZOrder).
///
/// Ordering rules:
/// 1) `z`: ascending (back-to-front)
/// 2) `seq`: ascending insertion sequence, so equal z keeps insertion order
///
/// The key holds an [`ElementId`], not the element. A key whose element has been
/// removed simply no longer resolves.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ZOrderKey {
    pub z: ZIndex,
    /// Insertion sequence number, unique within one `ZOrder`.
    pub seq: u64,
    pub id: ElementId,
}

impl ZOrderKey {
    #[inline]
    pub const fn new(z: ZIndex, seq: u64, id: ElementId) -> Self {
        Self { z, seq, id }
    }

    /// Placement equality: two keys share a compositing slot when their z matches.
    ///
    /// Ties are not an error; they are drawn in insertion order.
    #[inline]
    pub fn same_z(&self, other: &Self) -> bool {
        self.z == other.z
    }
}

impl Ord for ZOrderKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.z
            .cmp(&other.z)
            .then(self.seq.cmp(&other.seq))
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for ZOrderKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
