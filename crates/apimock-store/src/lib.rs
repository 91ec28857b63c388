//! Path-addressed resource storage for the apimock server.
//!
//! This crate holds everything a mock REST backend has to remember: the
//! last payload written to each path, the content type to serve it with,
//! and the index of every collection that clients have POSTed into.
//!
//! # Paths
//!
//! - An **item path** such as `/users/0` holds a client payload.
//! - A **collection path** such as `/users` holds a JSON index document,
//!   `{"Resources":[0,1]}`, listing its live children. It is created by the
//!   first child creation, never by a read.
//!
//! # Storage Backends
//!
//! All backends implement the [`ResourceStore`] trait:
//!
//! - [`InMemoryResourceStore`] -- `HashMap` behind a single readers-writer lock
//!
//! # Design Rules
//!
//! 1. Entries are immutable; an update replaces the whole entry.
//! 2. One trailing `/` is insignificant for lookups.
//! 3. Child IDs start at 0 and are never reused, even after deletion.
//! 4. Index updates and child writes happen under one lock acquisition.
//! 5. Request bodies are read before the lock is taken.
//! 6. Body read errors are propagated, never silently ignored.

pub mod content_type;
pub mod entry;
pub mod error;
pub mod index;
pub mod memory;
pub mod path;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use content_type::{resolve_content_type, JSON_CONTENT_TYPE};
pub use entry::{Entry, EntryKind};
pub use error::{StoreError, StoreResult};
pub use index::CollectionIndex;
pub use memory::InMemoryResourceStore;
pub use traits::{CreatedChild, ResourceStore};
