//! Ownership and lookup of constructed services.
//!
//! The [`InstanceStore`] owns every object a container built or was handed. The
//! [`Registry`] maps an identity to a weak back-reference into one of those entries, so
//! it can never keep an object alive on its own or point at a dropped one.

use crate::identity::ServiceKey;
use dashmap::DashMap;
use std::any::Any;
use std::sync::{Arc, Weak};
use tracing::trace;

/// An owning, type-erased service handle. The concrete type behind it is `Arc<T>`.
pub(crate) type Erased = Arc<dyn Any + Send + Sync>;

/// A non-owning reference to an [`Erased`] handle.
pub(crate) type ErasedRef = Weak<dyn Any + Send + Sync>;

struct Entry {
  key: ServiceKey,
  handle: Erased,
}

/// Ordered list of owned instances. Entries drop last-in, first-out.
#[derive(Default)]
pub(crate) struct InstanceStore {
  entries: Vec<Entry>,
}

impl InstanceStore {
  /// Takes ownership of `handle` and returns the back-reference to index it with.
  pub(crate) fn push(&mut self, key: ServiceKey, handle: Erased) -> ErasedRef {
    let weak = Arc::downgrade(&handle);
    self.entries.push(Entry { key, handle });
    weak
  }

  /// Moves every entry of `other` to the end of this store, keeping their order.
  pub(crate) fn append(&mut self, mut other: InstanceStore) {
    self.entries.append(&mut other.entries);
  }

  pub(crate) fn len(&self) -> usize {
    self.entries.len()
  }

  /// Identities of the owned entries, oldest first. May repeat.
  pub(crate) fn keys(&self) -> impl Iterator<Item = ServiceKey> + '_ {
    self.entries.iter().map(|entry| entry.key)
  }
}

impl Drop for InstanceStore {
  fn drop(&mut self) {
    while let Some(entry) = self.entries.pop() {
      trace!(service = entry.key.name(), "dropping instance");
      drop(entry.handle);
    }
  }
}

/// Identity to instance index.
#[derive(Default)]
pub(crate) struct Registry {
  map: DashMap<ServiceKey, ErasedRef>,
}

impl Registry {
  /// Returns the live handle registered under `key`, if any.
  pub(crate) fn lookup(&self, key: &ServiceKey) -> Option<Erased> {
    self.map.get(key).and_then(|weak| weak.upgrade())
  }

  pub(crate) fn insert(&self, key: ServiceKey, weak: ErasedRef) {
    self.map.insert(key, weak);
  }

  /// Copies every pair into a new, independent registry.
  pub(crate) fn snapshot(&self) -> Registry {
    Registry {
      map: self.map.clone(),
    }
  }

  /// Copies the pairs of `other` for `keys` into this registry, replacing existing ones.
  /// Pairs whose instance is gone are skipped.
  pub(crate) fn absorb(&self, other: &Registry, keys: impl IntoIterator<Item = ServiceKey>) {
    for key in keys {
      let Some(weak) = other.map.get(&key).map(|pair| pair.value().clone()) else {
        continue;
      };
      if weak.strong_count() > 0 {
        self.map.insert(key, weak);
      }
    }
  }

  pub(crate) fn clear(&self) {
    self.map.clear();
  }
}
