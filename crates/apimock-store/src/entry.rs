use bytes::Bytes;

use crate::content_type::JSON_CONTENT_TYPE;
use crate::error::StoreResult;
use crate::index::CollectionIndex;

/// What a stored entry represents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// A payload written by a client.
    Item,
    /// The index document of a collection path.
    Collection(CollectionIndex),
}

/// A stored payload and the content type it is served with.
///
/// Entries are immutable: an update replaces the whole entry. Cloning is
/// cheap since the body is reference counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    body: Bytes,
    content_type: String,
    kind: EntryKind,
}

impl Entry {
    /// A client payload.
    pub fn item(body: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            content_type: content_type.into(),
            kind: EntryKind::Item,
        }
    }

    /// The JSON index document for a collection.
    pub fn collection(index: CollectionIndex) -> StoreResult<Self> {
        Ok(Self {
            body: index.to_json()?,
            content_type: JSON_CONTENT_TYPE.to_string(),
            kind: EntryKind::Collection(index),
        })
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.kind, EntryKind::Collection(_))
    }

    /// The collection index, if this entry is one.
    pub fn index(&self) -> Option<&CollectionIndex> {
        match &self.kind {
            EntryKind::Collection(index) => Some(index),
            EntryKind::Item => None,
        }
    }

    /// Consume the entry, returning its body and content type.
    pub fn into_parts(self) -> (Bytes, String) {
        (self.body, self.content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_entry() {
        let e = Entry::item(&b"hello"[..], "text/plain");
        assert_eq!(&e.body()[..], b"hello");
        assert_eq!(e.content_type(), "text/plain");
        assert!(!e.is_collection());
        assert!(e.index().is_none());
    }

    #[test]
    fn collection_entry_is_json() {
        let mut index = CollectionIndex::new();
        index.allocate();
        let e = Entry::collection(index).unwrap();
        assert!(e.is_collection());
        assert_eq!(e.content_type(), "application/json");
        assert_eq!(&e.body()[..], br#"{"Resources":[0]}"#);
        assert_eq!(e.index().map(|i| i.next_id()), Some(1));
    }

    #[test]
    fn into_parts() {
        let (body, ct) = Entry::item(Bytes::from_static(b"x"), "a/b").into_parts();
        assert_eq!(&body[..], b"x");
        assert_eq!(ct, "a/b");
    }
}
