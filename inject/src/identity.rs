//! Type identity and the per-thread resolution guard.

use crate::error::{Error, Result};
use std::any::{type_name, TypeId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;

thread_local! {
  // The (container, service) pairs whose construction is in progress on this thread.
  // A second entry for the same pair means the dependency graph loops back on itself.
  static RESOLVING_STACK: RefCell<HashSet<(u64, ServiceKey)>> = RefCell::new(HashSet::new());
}

/// An RAII guard marking a service as under construction.
///
/// Entering fails with `CircularDependency` if the same service is already being built
/// by the same container on this thread. The mark is removed when the guard drops,
/// including when construction bails out with an error.
pub(crate) struct ResolutionGuard {
  container: u64,
  key: ServiceKey,
}

impl ResolutionGuard {
  pub(crate) fn enter(container: u64, key: ServiceKey) -> Result<Self> {
    let fresh = RESOLVING_STACK.with(|stack| stack.borrow_mut().insert((container, key)));
    if !fresh {
      return Err(Error::CircularDependency { service: key.name });
    }
    Ok(Self { container, key })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&(self.container, self.key));
    });
  }
}

/// Identity of a service type: the lookup key of the registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ServiceKey {
  type_id: TypeId,
  name: &'static str,
}

impl ServiceKey {
  pub(crate) fn of<T: ?Sized + 'static>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      name: type_name::<T>(),
    }
  }

  pub(crate) fn name(&self) -> &'static str {
    self.name
  }
}

impl fmt::Debug for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key({})", self.name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  trait Storage {}

  #[test]
  fn keys_distinguish_concrete_and_trait_object_types() {
    assert_eq!(ServiceKey::of::<String>(), ServiceKey::of::<String>());
    assert_ne!(ServiceKey::of::<String>(), ServiceKey::of::<dyn Storage>());
    assert_ne!(ServiceKey::of::<u32>(), ServiceKey::of::<u64>());
  }

  #[test]
  fn guard_rejects_reentry_for_the_same_container() {
    let key = ServiceKey::of::<String>();
    let _outer = ResolutionGuard::enter(1, key).unwrap();

    assert!(matches!(
      ResolutionGuard::enter(1, key),
      Err(Error::CircularDependency { .. })
    ));
    // Another container building the same type is not a cycle.
    assert!(ResolutionGuard::enter(2, key).is_ok());
  }

  #[test]
  fn guard_releases_on_drop() {
    let key = ServiceKey::of::<u8>();
    drop(ResolutionGuard::enter(7, key).unwrap());
    assert!(ResolutionGuard::enter(7, key).is_ok());
  }
}
