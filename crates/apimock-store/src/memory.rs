use std::collections::HashMap;
use std::io::Read;

use bytes::Bytes;
use parking_lot::RwLock;
use tracing::debug;

use crate::content_type::resolve_content_type;
use crate::entry::Entry;
use crate::error::{StoreError, StoreResult};
use crate::index::CollectionIndex;
use crate::path::{child_path, has_trailing_separator, normalize, parse_child_id, split_child};
use crate::traits::{CreatedChild, ResourceStore};

/// In-memory, HashMap-based resource store.
///
/// A single `RwLock` guards the whole map: lookups share the read lock,
/// every mutation holds the write lock for its full read-modify-write.
/// Nothing survives a restart.
pub struct InMemoryResourceStore {
    entries: RwLock<HashMap<String, Entry>>,
    default_content_type: String,
    override_content_type: String,
}

impl InMemoryResourceStore {
    /// Create an empty store with no default or override content type.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_content_type: String::new(),
            override_content_type: String::new(),
        }
    }

    /// Content type used when a request carries none.
    pub fn with_default_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.default_content_type = content_type.into();
        self
    }

    /// Content type stored for every request, whatever it carries.
    /// An empty string disables the override.
    pub fn with_override_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.override_content_type = content_type.into();
        self
    }

    pub fn default_content_type(&self) -> &str {
        &self.default_content_type
    }

    pub fn override_content_type(&self) -> Option<&str> {
        Some(self.override_content_type.as_str()).filter(|ct| !ct.is_empty())
    }

    /// Number of entries, collection indexes included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Sorted list of every stored path.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.entries.read().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    fn resolve(&self, request_content_type: &str) -> String {
        resolve_content_type(
            request_content_type,
            &self.override_content_type,
            &self.default_content_type,
        )
    }

    fn read_body(body: &mut dyn Read) -> StoreResult<Bytes> {
        let mut buf = Vec::new();
        body.read_to_end(&mut buf)?;
        Ok(Bytes::from(buf))
    }

    /// Remove child `id` stored at `child` and drop it from the index at
    /// `collection`. Caller holds the write lock.
    fn remove_child_locked(
        entries: &mut HashMap<String, Entry>,
        collection: &str,
        child: &str,
        id: u64,
    ) -> StoreResult<bool> {
        match entries.get(child) {
            None => return Ok(false),
            Some(existing) if existing.is_collection() => {
                return Err(StoreError::not_allowed(child, "collection index cannot be deleted"));
            }
            Some(_) => {}
        }

        // Encode the new index before touching the map so a failure leaves
        // both entries as they were.
        let updated_index = match entries.get(collection).and_then(Entry::index) {
            Some(index) if index.contains(id) => {
                let mut index = index.clone();
                index.remove(id);
                Some(Entry::collection(index)?)
            }
            _ => None,
        };

        entries.remove(child);
        if let Some(index_entry) = updated_index {
            entries.insert(collection.to_string(), index_entry);
        }
        debug!(collection, child, id, "deleted collection child");
        Ok(true)
    }
}

impl Default for InMemoryResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceStore for InMemoryResourceStore {
    fn get(&self, path: &str) -> Option<Entry> {
        self.entries.read().get(normalize(path)).cloned()
    }

    fn set(&self, path: &str, body: &mut dyn Read, content_type: &str) -> StoreResult<()> {
        let body = Self::read_body(body)?;
        let content_type = self.resolve(content_type);
        let path = normalize(path);

        let mut entries = self.entries.write();
        if entries.get(path).is_some_and(Entry::is_collection) {
            return Err(StoreError::not_allowed(path, "collection index cannot be overwritten"));
        }
        debug!(path, content_type = %content_type, bytes = body.len(), "stored entry");
        entries.insert(path.to_string(), Entry::item(body, content_type));
        Ok(())
    }

    fn replace(&self, path: &str, body: &mut dyn Read, content_type: &str) -> StoreResult<Entry> {
        let body = Self::read_body(body)?;
        let content_type = self.resolve(content_type);
        let path = normalize(path);

        let mut entries = self.entries.write();
        let slot = entries
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        if slot.is_collection() {
            return Err(StoreError::not_allowed(path, "collection index cannot be overwritten"));
        }
        let entry = Entry::item(body, content_type);
        *slot = entry.clone();
        debug!(path, bytes = entry.body().len(), "replaced entry");
        Ok(entry)
    }

    fn delete(&self, path: &str) -> StoreResult<bool> {
        if has_trailing_separator(path) {
            return Err(StoreError::not_allowed(path, "cannot delete a collection path"));
        }

        let mut entries = self.entries.write();
        if entries.get(path).is_some_and(Entry::is_collection) {
            return Err(StoreError::not_allowed(path, "collection index cannot be deleted"));
        }

        if let Some((parent, segment)) = split_child(path) {
            if entries.get(parent).is_some_and(Entry::is_collection) {
                let id = parse_child_id(segment).ok_or_else(|| {
                    StoreError::not_allowed(path, format!("{segment:?} is not a child id of {parent}"))
                })?;
                return Self::remove_child_locked(&mut entries, parent, path, id);
            }
        }

        let removed = entries.remove(path).is_some();
        if removed {
            debug!(path, "deleted entry");
        }
        Ok(removed)
    }

    fn create_child(
        &self,
        collection: &str,
        body: &mut dyn Read,
        content_type: &str,
    ) -> StoreResult<CreatedChild> {
        if collection.is_empty() || has_trailing_separator(collection) {
            return Err(StoreError::not_allowed(
                collection,
                "children are created on the collection path without a trailing separator",
            ));
        }
        let body = Self::read_body(body)?;
        let content_type = self.resolve(content_type);

        let mut entries = self.entries.write();
        let mut index = match entries.get(collection) {
            None => CollectionIndex::new(),
            Some(existing) => existing
                .index()
                .cloned()
                .ok_or_else(|| StoreError::not_allowed(collection, "path holds an item, not a collection"))?,
        };

        // Never land on a path that already holds an entry, such as a
        // nested collection created by a POST to `collection/<id>`.
        let id = index.allocate_unless(|id| entries.contains_key(&child_path(collection, id)));
        let path = child_path(collection, id);
        let index_entry = Entry::collection(index)?;
        let entry = Entry::item(body, content_type);

        entries.insert(collection.to_string(), index_entry);
        entries.insert(path.clone(), entry.clone());
        debug!(collection, id, path = %path, "created collection child");

        Ok(CreatedChild { path, id, entry })
    }

    fn delete_child(&self, collection: &str, child: &str) -> StoreResult<bool> {
        let collection = normalize(collection);
        if has_trailing_separator(child) {
            return Err(StoreError::not_allowed(child, "cannot delete a collection path"));
        }
        let segment = match split_child(child) {
            Some((parent, segment)) if parent == collection => segment,
            _ => {
                return Err(StoreError::not_allowed(
                    child,
                    format!("not a child of {collection}"),
                ))
            }
        };
        let id = parse_child_id(segment).ok_or_else(|| {
            StoreError::not_allowed(child, format!("{segment:?} is not a child id"))
        })?;

        let mut entries = self.entries.write();
        let is_collection = match entries.get(collection) {
            None => return Ok(false),
            Some(existing) => existing.is_collection(),
        };
        if !is_collection {
            return Err(StoreError::not_allowed(
                collection,
                "path holds an item, not a collection",
            ));
        }
        Self::remove_child_locked(&mut entries, collection, child, id)
    }
}

impl std::fmt::Debug for InMemoryResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryResourceStore")
            .field("entry_count", &self.len())
            .field("default_content_type", &self.default_content_type)
            .field("override_content_type", &self.override_content_type)
            .finish()
    }
}
