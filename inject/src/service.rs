//! Traits a type implements to be managed by a [`Container`].

use crate::autocall::Autocall;
use crate::container::Container;
use crate::error::Result;
use crate::overrides::Overrides;
use std::sync::Arc;

/// A component type managed by the container.
///
/// `Kind` decides how the container hands the service out: [`Single`] and [`Abstract`]
/// services are shared as `Arc<Self>`, [`Transient`] services are built for every request.
/// Trait objects can be services too, which is how abstract identities are declared:
///
/// ```
/// use fibre_inject::{Abstract, Service};
///
/// trait Storage: Send + Sync {
///   fn root(&self) -> &str;
/// }
///
/// impl Service for dyn Storage {
///   type Kind = Abstract;
/// }
/// ```
pub trait Service: Send + Sync + 'static {
  type Kind: Kind;

  /// Declares the parent identities this service can also be resolved as.
  ///
  /// Only used for shared services; transients are never registered.
  fn overrides(aliases: &mut Overrides<Self>)
  where
    Self: Sized,
  {
    let _ = aliases;
  }

  /// Declares the hooks to run, in order, right after construction.
  fn autocall(hooks: &mut Autocall<'_, Self>)
  where
    Self: Sized,
  {
    let _ = hooks;
  }
}

/// The factory of a service.
///
/// `Args` are the arguments a caller passes explicitly. A factory usually hands them to
/// [`Container::invoke`], which resolves its leading parameters from the container and
/// fills the trailing ones with `args`:
///
/// ```
/// use fibre_inject::{Construct, Container, Result, Service, Single, Transient};
/// use std::sync::Arc;
///
/// struct Pool;
/// impl Service for Pool {
///   type Kind = Single;
/// }
/// impl Construct for Pool {
///   fn construct(_: &Container, _: ()) -> Result<Self> {
///     Ok(Pool)
///   }
/// }
///
/// struct Session {
///   pool: Arc<Pool>,
///   user: String,
/// }
/// impl Service for Session {
///   type Kind = Transient;
/// }
/// impl Construct<(String,)> for Session {
///   fn construct(container: &Container, args: (String,)) -> Result<Self> {
///     container.invoke(|pool: Arc<Pool>, user: String| Session { pool, user }, args)
///   }
/// }
///
/// let container = Container::new();
/// let session = container.service_with::<Session, _>(("ada".to_string(),)).unwrap();
/// assert_eq!(session.user, "ada");
/// ```
pub trait Construct<Args = ()>: Service + Sized {
  fn construct(container: &Container, args: Args) -> Result<Self>;
}

/// Marker for the kinds a service can declare. Sealed.
pub trait Kind: sealed::Sealed {}

/// How a container resolves services of a given kind.
///
/// Implemented by each [`Kind`] for the services it can resolve without explicit
/// arguments. A transient that is only constructible from caller-supplied arguments has
/// no impl, so it can be built with `service_with` but not with `service`.
pub trait ServiceKind<T: ?Sized>: Kind {
  /// What `Container::service` returns for `T`.
  type Handle;

  fn resolve(container: &Container) -> Result<Self::Handle>;

  /// Resolves `T` as a shared pointer, used when it is injected as `Arc<T>`.
  fn shared(container: &Container) -> Result<Arc<T>>;
}

/// Kinds whose instances live in the container.
pub trait Shared: Kind {}

/// At most one instance per container scope, built on first request.
pub enum Single {}

/// A fresh instance for every request, owned by the caller.
pub enum Transient {}

/// A shared identity without an on-demand factory.
///
/// It resolves only after something was registered under it: an instance, or a view
/// declared through [`Service::overrides`] of a service that has been built.
pub enum Abstract {}

impl<T: Construct> ServiceKind<T> for Single {
  type Handle = Arc<T>;

  fn resolve(container: &Container) -> Result<Arc<T>> {
    container.single::<T>()
  }

  fn shared(container: &Container) -> Result<Arc<T>> {
    container.single::<T>()
  }
}

impl<T: Construct> ServiceKind<T> for Transient {
  type Handle = T;

  fn resolve(container: &Container) -> Result<T> {
    container.transient::<T, ()>(())
  }

  fn shared(container: &Container) -> Result<Arc<T>> {
    container.transient::<T, ()>(()).map(Arc::new)
  }
}

impl<T: ?Sized + Service> ServiceKind<T> for Abstract {
  type Handle = Arc<T>;

  fn resolve(container: &Container) -> Result<Arc<T>> {
    container.require::<T>()
  }

  fn shared(container: &Container) -> Result<Arc<T>> {
    container.require::<T>()
  }
}

impl Kind for Single {}
impl Kind for Transient {}
impl Kind for Abstract {}

impl Shared for Single {}
impl Shared for Abstract {}

/// The type `Container::service::<T>()` resolves to.
pub type ServiceType<T> = <<T as Service>::Kind as ServiceKind<T>>::Handle;

mod sealed {
  pub trait Sealed {}

  impl Sealed for super::Single {}
  impl Sealed for super::Transient {}
  impl Sealed for super::Abstract {}
}
