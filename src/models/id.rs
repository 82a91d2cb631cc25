//! Lazily assigned database ids.

use std::sync::{Arc, OnceLock};

/// Handle to a row's primary key that may not be known yet.
///
/// Records are created long before the saver reserves keys for them, so
/// references between records are made through `DbId`s. Clones share one
/// slot: once the saver resolves a record's own id, every foreign key cloned
/// from it sees the same value.
#[derive(Clone, Default)]
pub struct DbId(Arc<OnceLock<i64>>);

impl DbId {
    /// A new unresolved id.
    pub fn new() -> Self {
        Self::default()
    }

    /// An id that already refers to a stored row.
    pub fn existing(id: i64) -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(id);
        DbId(Arc::new(slot))
    }

    pub fn get(&self) -> Option<i64> {
        self.0.get().copied()
    }

    pub fn is_resolved(&self) -> bool {
        self.0.get().is_some()
    }

    /// Resolves the slot to `id`.
    ///
    /// Returns the value the slot holds afterwards; `Err` carries the
    /// previously stored value when it differs from `id`.
    pub fn resolve(&self, id: i64) -> Result<i64, i64> {
        let current = *self.0.get_or_init(|| id);
        if current == id {
            Ok(current)
        } else {
            Err(current)
        }
    }

    /// Whether both handles share the same slot.
    pub fn same_as(&self, other: &DbId) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for DbId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some(id) => write!(f, "DbId({})", id),
            None => f.write_str("DbId(unresolved)"),
        }
    }
}
