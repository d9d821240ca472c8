//! The main `Container` struct and its associated methods.

use crate::autocall::Autocall;
use crate::error::{Error, Result};
use crate::identity::{ResolutionGuard, ServiceKey};
use crate::invoke::{Direct, Injectable};
use crate::overrides::Overrides;
use crate::service::{Construct, Service, ServiceKind, ServiceType, Shared, Transient};
use crate::store::{Erased, InstanceStore, Registry};
use dashmap::DashMap;
use parking_lot::{Mutex, ReentrantMutex};
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// The dependency-injection container.
///
/// It owns every singleton it builds or is given, indexes them by type, and builds missing
/// ones on request by resolving the parameters their factories declare. It is thread-safe:
/// lookups go through a sharded map, and building a missing singleton is serialized per
/// identity, so a factory runs at most once per identity even under contention. A factory
/// may hand work to other threads that resolve other services from the same container;
/// only waiting on a thread that resolves the very service being built blocks forever, as
/// does resolving both ends of a dependency cycle from two threads at once.
/// Locks are never held while user `Drop` impls run.
pub struct Container {
  id: u64,
  registry: Registry,
  instances: Mutex<InstanceStore>,
  building: DashMap<ServiceKey, Arc<ReentrantMutex<()>>>,
  extension: Option<Arc<dyn Any + Send + Sync>>,
}

impl Default for Container {
  fn default() -> Self {
    Self::build(Registry::default(), None)
  }
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty container carrying `extension`, reachable through the
  /// [`Extension`](crate::Extension) accessor. Forks share it.
  pub fn with_extension<E: Any + Send + Sync>(extension: E) -> Self {
    Self::build(Registry::default(), Some(Arc::new(extension)))
  }

  fn build(registry: Registry, extension: Option<Arc<dyn Any + Send + Sync>>) -> Self {
    Self {
      id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
      registry,
      instances: Mutex::new(InstanceStore::default()),
      building: DashMap::new(),
      extension,
    }
  }

  /// The extension this container was created with, if it is an `E`.
  pub fn extension<E: Any>(&self) -> Option<&E> {
    self.extension.as_deref()?.downcast_ref::<E>()
  }

  // --- Instance Registration ---

  /// Takes ownership of an already constructed service and registers it, along with the
  /// overrides it declares. Autocall hooks are not run.
  pub fn instance<T>(&self, service: T) -> Arc<T>
  where
    T: Service,
    T::Kind: Shared,
  {
    self.save_instance(service)
  }

  /// Constructs `T` with explicit arguments and registers it immediately.
  pub fn instance_with<T, Args>(&self, args: Args) -> Result<Arc<T>>
  where
    T: Construct<Args>,
    T::Kind: Shared,
  {
    let service = self.make_instance::<T, Args>(args)?;
    Ok(self.save_instance(service))
  }

  /// Registers a shared handle under `T`'s identity. `T` may be a trait object.
  ///
  /// Overrides are not applied.
  pub fn instance_shared<T>(&self, service: Arc<T>) -> Arc<T>
  where
    T: ?Sized + Service,
    T::Kind: Shared,
  {
    let key = ServiceKey::of::<T>();
    let mut instances = self.instances.lock();
    let weak = instances.push(key, Arc::new(Arc::clone(&service)));
    self.registry.insert(key, weak);
    trace!(service = key.name(), container = self.id, "stored shared instance");
    service
  }

  // --- Resolution ---

  /// Resolves `T`: the shared instance for singletons, a new value for transients.
  pub fn service<T>(&self) -> Result<ServiceType<T>>
  where
    T: ?Sized + Service,
    T::Kind: ServiceKind<T>,
  {
    <T::Kind as ServiceKind<T>>::resolve(self)
  }

  /// Builds a transient `T`, passing `args` as the trailing factory arguments.
  pub fn service_with<T, Args>(&self, args: Args) -> Result<T>
  where
    T: Construct<Args> + Service<Kind = Transient>,
  {
    self.transient::<T, Args>(args)
  }

  /// Calls `function`, resolving its leading parameters and passing `explicit` as the
  /// trailing ones.
  pub fn invoke<'c, F, Auto, Explicit>(&'c self, function: F, explicit: Explicit) -> Result<F::Output>
  where
    F: Injectable<'c, Direct, Auto, Explicit>,
  {
    function.call(self, explicit)
  }

  /// Like [`invoke`](Self::invoke), resolving each parameter through the mapping `M`.
  pub fn invoke_mapped<'c, M, F, Auto, Explicit>(
    &'c self,
    function: F,
    explicit: Explicit,
  ) -> Result<F::Output>
  where
    F: Injectable<'c, M, Auto, Explicit>,
  {
    function.call(self, explicit)
  }

  /// Whether a live instance is registered under `T`'s identity.
  pub fn contains<T: ?Sized + 'static>(&self) -> bool {
    self.registry.lookup(&ServiceKey::of::<T>()).is_some()
  }

  /// Number of instances this container owns, override views included.
  pub fn len(&self) -> usize {
    self.instances.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  // --- Scopes ---

  /// Creates a child container.
  ///
  /// The child starts with a copy of this container's registry, so everything resolvable
  /// here at the time of the fork resolves to the same instance there. It owns what it
  /// builds itself; none of it is visible here until [`merge`](Self::merge).
  pub fn fork(&self) -> Container {
    let child = Self::build(self.registry.snapshot(), self.extension.clone());
    debug!(container = self.id, child = child.id, "forked container");
    child
  }

  /// Takes over every instance `other` owns, with its registrations. Those replace
  /// existing ones for the same identity. What `other` only inherited from this container
  /// when it was forked is left alone.
  pub fn merge(&self, other: Container) {
    let incoming = std::mem::take(&mut *other.instances.lock());
    let moved = incoming.len();
    self.registry.absorb(&other.registry, incoming.keys());
    self.instances.lock().append(incoming);
    debug!(container = self.id, from = other.id, instances = moved, "merged container");
  }

  /// Drops every registration and instance, last constructed first.
  pub fn clear(&self) {
    self.registry.clear();
    let dropped = std::mem::take(&mut *self.instances.lock());
    debug!(container = self.id, instances = dropped.len(), "clearing container");
    drop(dropped);
  }

  // --- Internals ---

  pub(crate) fn lookup<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
    self
      .registry
      .lookup(&ServiceKey::of::<T>())
      .and_then(|handle| handle.downcast_ref::<Arc<T>>().cloned())
  }

  /// Looks up a service that must already be registered.
  pub(crate) fn require<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
    self.lookup::<T>().ok_or_else(Error::no_instance::<T>)
  }

  /// Returns the singleton `T`, building and storing it first if needed.
  pub(crate) fn single<T: Construct>(&self) -> Result<Arc<T>> {
    if let Some(service) = self.lookup::<T>() {
      return Ok(service);
    }

    let key = ServiceKey::of::<T>();
    let lock = Arc::clone(self.building.entry(key).or_default().value());
    let _building = lock.lock();
    // Another thread may have finished building it while we waited.
    if let Some(service) = self.lookup::<T>() {
      return Ok(service);
    }
    let service = self.make_instance::<T, ()>(())?;
    Ok(self.save_instance(service))
  }

  pub(crate) fn transient<T: Construct<Args>, Args>(&self, args: Args) -> Result<T> {
    self.make_instance::<T, Args>(args)
  }

  /// Runs the factory, then the autocall chain. Nothing is registered here.
  fn make_instance<T: Construct<Args>, Args>(&self, args: Args) -> Result<T> {
    let key = ServiceKey::of::<T>();
    let _guard = ResolutionGuard::enter(self.id, key)?;
    debug!(service = key.name(), container = self.id, "constructing service");

    let mut service = T::construct(self, args)?;

    let mut hooks = Autocall::new();
    T::autocall(&mut hooks);
    if !hooks.is_empty() {
      trace!(service = key.name(), hooks = hooks.len(), "running autocall hooks");
      hooks.run(&mut service, self)?;
    }
    Ok(service)
  }

  /// Stores `service` under its override identities first, then under its own.
  fn save_instance<T: Service>(&self, service: T) -> Arc<T> {
    let key = ServiceKey::of::<T>();
    let service = Arc::new(service);

    let mut aliases = Overrides::new();
    T::overrides(&mut aliases);

    let mut instances = self.instances.lock();
    for (alias, view) in aliases.views(&service) {
      let weak = instances.push(alias, view);
      self.registry.insert(alias, weak);
    }
    let handle: Erased = Arc::new(Arc::clone(&service));
    let weak = instances.push(key, handle);
    self.registry.insert(key, weak);

    trace!(
      service = key.name(),
      container = self.id,
      aliases = aliases.len(),
      "stored singleton"
    );
    service
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("id", &self.id)
      .field("instances", &self.len())
      .field("extension", &self.extension.is_some())
      .finish()
  }
}
