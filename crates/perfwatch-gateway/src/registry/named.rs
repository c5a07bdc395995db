use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;

/// Identifies one `register` call, so a collector tearing itself down only
/// removes its own entry and not a newer one under the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

struct Entry<T: ?Sized> {
    id: RegistrationId,
    handle: Weak<T>,
}

/// Name -> live handle map shared between whoever creates collectors and
/// whoever resolves them by name.
///
/// - Handles are held as `Weak`: the registry never keeps a collector alive.
/// - Registering an existing name replaces the previous entry.
/// - Every operation is total; a missing name is `None`, never an error.
pub struct NamedRegistry<T: ?Sized> {
    entries: DashMap<String, Entry<T>>,
    seq: AtomicU64,
}

impl<T: ?Sized> Default for NamedRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> NamedRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }

    /// Insert or replace the entry for `name`.
    pub fn register(&self, name: impl Into<String>, handle: &Arc<T>) -> RegistrationId {
        let name = name.into();
        let id = RegistrationId(self.seq.fetch_add(1, Ordering::Relaxed));
        let previous = self.entries.insert(
            name.clone(),
            Entry {
                id,
                handle: Arc::downgrade(handle),
            },
        );
        if previous.is_some() {
            tracing::debug!(%name, "registry entry replaced");
        } else {
            tracing::debug!(%name, "registry entry added");
        }
        id
    }

    /// Live handle for `name`. Entries whose owner is gone read as absent.
    pub fn lookup(&self, name: &str) -> Option<Arc<T>> {
        self.entries.get(name).and_then(|e| e.value().handle.upgrade())
    }

    /// Remove `name` if present.
    pub fn deregister(&self, name: &str) {
        if self.entries.remove(name).is_some() {
            tracing::debug!(%name, "registry entry removed");
        }
    }

    /// Remove `name` only while it still refers to registration `id`.
    /// Returns whether an entry was removed.
    pub fn deregister_if(&self, name: &str, id: RegistrationId) -> bool {
        let removed = self.entries.remove_if(name, |_, e| e.id == id).is_some();
        if removed {
            tracing::debug!(%name, "registry entry removed");
        }
        removed
    }

    /// Point-in-time copy of the names with a live handle.
    pub fn all_names(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|e| e.value().handle.strong_count() > 0)
            .map(|e| e.key().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
