use bytes::Bytes;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

/// The ordered list of child IDs allocated under a collection path.
///
/// Encoded as `{"Resources":[0,1,...]}` when served. IDs come from a
/// monotonically increasing counter and are never handed out twice, even
/// after the child holding them has been deleted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CollectionIndex {
    #[serde(rename = "Resources")]
    resources: Vec<u64>,
    #[serde(skip)]
    next_id: u64,
}

impl CollectionIndex {
    /// An index with no children that will allocate ID 0 next.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live child IDs in allocation order.
    pub fn ids(&self) -> &[u64] {
        &self.resources
    }

    /// The lowest ID [`allocate`](Self::allocate) may still return.
    /// Never decreases.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.resources.contains(&id)
    }

    /// Allocate a fresh child ID and append it to the list.
    pub fn allocate(&mut self) -> u64 {
        self.allocate_unless(|_| false)
    }

    /// Like [`allocate`](Self::allocate), but passes over every ID for which
    /// `taken` returns `true`. Skipped IDs are never handed out later.
    pub fn allocate_unless(&mut self, taken: impl Fn(u64) -> bool) -> u64 {
        while taken(self.next_id) {
            self.next_id += 1;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.resources.push(id);
        id
    }

    /// Drop `id` from the live list. Returns `true` if it was present.
    /// The allocation counter is left untouched.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.resources.len();
        self.resources.retain(|&existing| existing != id);
        self.resources.len() != before
    }

    /// Encode the index document served for GET on the collection path.
    pub fn to_json(&self) -> StoreResult<Bytes> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }
}
