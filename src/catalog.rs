//! Ordered, name-keyed collection of the media records loaded this session.
//!
//! The catalog is the single source of truth for per-item state: every view
//! reads and mutates records through the shared handles stored here.

use crate::model::MediaRecord;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;

#[derive(Default)]
struct Inner {
    entries: Vec<Arc<MediaRecord>>,
    by_name: HashMap<String, usize>,
}

#[derive(Default)]
pub struct Catalog {
    inner: RwLock<Inner>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("catalog lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("catalog lock poisoned")
    }

    /// Append a record, preserving insertion order. A record whose name is
    /// already present is refused; names are unique within a session.
    pub fn insert(&self, record: MediaRecord) -> Option<Arc<MediaRecord>> {
        let mut inner = self.write();
        if inner.by_name.contains_key(&record.name) {
            warn!(name = %record.name, "duplicate media name ignored");
            return None;
        }
        let record = Arc::new(record);
        let index = inner.entries.len();
        inner.by_name.insert(record.name.clone(), index);
        inner.entries.push(Arc::clone(&record));
        Some(record)
    }

    pub fn get(&self, name: &str) -> Option<Arc<MediaRecord>> {
        let inner = self.read();
        inner
            .by_name
            .get(name)
            .map(|&index| Arc::clone(&inner.entries[index]))
    }

    /// Position of a record in insertion order, used to open the viewer at
    /// the clicked grid element.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.read().by_name.get(name).copied()
    }

    /// All records in insertion order.
    pub fn snapshot(&self) -> Vec<Arc<MediaRecord>> {
        self.read().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    pub fn clear(&self) {
        let mut inner = self.write();
        inner.entries.clear();
        inner.by_name.clear();
    }
}
