use std::io::Read;

use crate::entry::Entry;
use crate::error::StoreResult;

/// A child resource created under a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedChild {
    /// Full path of the new child, reported as the `Location` header.
    pub path: String,
    /// The ID allocated within the collection.
    pub id: u64,
    /// The stored child entry.
    pub entry: Entry,
}

/// Path-addressed resource store with collection semantics.
///
/// All implementations must satisfy these invariants:
/// - Keys are normalized paths (one trailing `/` trimmed); at most one entry
///   per path.
/// - Every operation is atomic with respect to every other operation on the
///   same store. Collection index updates and the matching child write are
///   observed together or not at all.
/// - Bodies are read from their source before any state changes; a failed
///   read leaves the store untouched.
/// - Child IDs within a collection start at 0, only increase, and are never
///   reused. An ID whose child path already holds an entry is skipped.
///
/// Paths whose entry is a collection index can only be read. Writes and
/// deletes against them fail with `MethodNotAllowed`.
pub trait ResourceStore: Send + Sync {
    /// Look up the entry stored at `path`.
    fn get(&self, path: &str) -> Option<Entry>;

    /// Store `body` at `path`, creating or overwriting an item entry.
    fn set(&self, path: &str, body: &mut dyn Read, content_type: &str) -> StoreResult<()>;

    /// Overwrite the existing item at `path` and return the new entry.
    ///
    /// Unlike [`set`](Self::set), never creates: an unknown path is
    /// `NotFound`.
    fn replace(&self, path: &str, body: &mut dyn Read, content_type: &str) -> StoreResult<Entry>;

    /// Remove the entry at `path`. Returns `true` if it existed.
    ///
    /// If the parent of `path` is a collection, this is a child deletion and
    /// follows [`delete_child`](Self::delete_child) rules.
    fn delete(&self, path: &str) -> StoreResult<bool>;

    /// Allocate the next free ID under `collection` and store `body` there.
    /// Existing entries below the collection are never overwritten.
    fn create_child(
        &self,
        collection: &str,
        body: &mut dyn Read,
        content_type: &str,
    ) -> StoreResult<CreatedChild>;

    /// Remove `child` from `collection`, both the entry and its index slot.
    ///
    /// `child` must be `collection/<id>` with a canonical integer ID.
    /// Returns `true` if the child existed.
    fn delete_child(&self, collection: &str, child: &str) -> StoreResult<bool>;
}
