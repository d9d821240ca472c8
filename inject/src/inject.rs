//! Parameter types the container knows how to supply.

use crate::container::Container;
use crate::error::{Error, Result};
use crate::service::{Construct, Service, ServiceKind, Transient};
use std::any::{type_name, Any};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A value the container can produce for a parameter, by type alone.
///
/// - `Arc<T>` for any [`Service`]: the shared instance (or a fresh one for transients).
/// - `Box<T>` for a [`Transient`] service: a fresh, uniquely owned instance.
/// - `&Container`: the container running the resolution.
/// - [`Fork`]: a new child of that container.
/// - [`Extension<E>`]: the container's extension capability.
pub trait Inject<'c>: Sized {
  fn inject(container: &'c Container) -> Result<Self>;
}

impl<'c, T> Inject<'c> for Arc<T>
where
  T: ?Sized + Service,
  T::Kind: ServiceKind<T>,
{
  fn inject(container: &'c Container) -> Result<Self> {
    <T::Kind as ServiceKind<T>>::shared(container)
  }
}

impl<'c, T> Inject<'c> for Box<T>
where
  T: Construct + Service<Kind = Transient>,
{
  fn inject(container: &'c Container) -> Result<Self> {
    container.transient::<T, ()>(()).map(Box::new)
  }
}

impl<'c> Inject<'c> for &'c Container {
  fn inject(container: &'c Container) -> Result<Self> {
    Ok(container)
  }
}

/// A child container forked from the one resolving the parameter.
///
/// Singletons it builds stay in the child until it is merged back.
pub struct Fork(Container);

impl Fork {
  pub fn into_inner(self) -> Container {
    self.0
  }
}

impl Deref for Fork {
  type Target = Container;

  fn deref(&self) -> &Container {
    &self.0
  }
}

impl fmt::Debug for Fork {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Fork").field(&self.0).finish()
  }
}

impl<'c> Inject<'c> for Fork {
  fn inject(container: &'c Container) -> Result<Self> {
    Ok(Fork(container.fork()))
  }
}

/// Borrowed access to the extension a container was created with.
///
/// Binding fails with [`Error::InvalidAccessorBinding`] when the container carries no
/// extension of type `E`.
pub struct Extension<'c, E>(&'c E);

impl<E> Deref for Extension<'_, E> {
  type Target = E;

  fn deref(&self) -> &E {
    self.0
  }
}

impl<'c, E: Any + Send + Sync> Inject<'c> for Extension<'c, E> {
  fn inject(container: &'c Container) -> Result<Self> {
    container
      .extension::<E>()
      .map(Extension)
      .ok_or(Error::InvalidAccessorBinding {
        accessor: type_name::<Self>(),
        capability: type_name::<E>(),
      })
  }
}
