//! The invocation engine: calling a function with its parameters supplied by a container.
//!
//! A callable's parameter list is split in two. The leading parameters are resolved from
//! the container, in declared order; the trailing ones are the explicit arguments the
//! caller passes as a tuple. With parameters `[X, Y, Z]` and explicit `(z,)`, `X` and `Y`
//! are resolved and `z` is passed as `Z`. Explicit arguments can only fill the tail.
//!
//! How each resolved parameter is produced is decided by a [`Mapping`]. The default,
//! [`Direct`], resolves every parameter type through its own [`Inject`] impl.

use crate::container::Container;
use crate::error::Result;
use crate::inject::Inject;

/// Supplies a value of parameter type `P` from a container.
///
/// Implement it on your own marker type to route specific parameter slots, e.g. to resolve
/// an `Arc<dyn Storage>` parameter by building a particular implementation:
///
/// ```
/// use fibre_inject::{Abstract, Construct, Container, Mapping, Result, Service, Single};
/// use std::sync::Arc;
///
/// trait Storage: Send + Sync {
///   fn name(&self) -> &'static str;
/// }
/// impl Service for dyn Storage {
///   type Kind = Abstract;
/// }
///
/// struct Disk;
/// impl Storage for Disk {
///   fn name(&self) -> &'static str {
///     "disk"
///   }
/// }
/// impl Service for Disk {
///   type Kind = Single;
/// }
/// impl Construct for Disk {
///   fn construct(_: &Container, _: ()) -> Result<Self> {
///     Ok(Disk)
///   }
/// }
///
/// enum OnDisk {}
/// impl<'c> Mapping<'c, Arc<dyn Storage>> for OnDisk {
///   fn provide(container: &'c Container) -> Result<Arc<dyn Storage>> {
///     let disk: Arc<dyn Storage> = container.service::<Disk>()?;
///     Ok(disk)
///   }
/// }
///
/// let container = Container::new();
/// let name = container
///   .invoke_mapped::<OnDisk, _, _, _>(|storage: Arc<dyn Storage>| storage.name(), ())
///   .unwrap();
/// assert_eq!(name, "disk");
/// ```
pub trait Mapping<'c, P> {
  fn provide(container: &'c Container) -> Result<P>;
}

/// Resolves every parameter through its [`Inject`] impl.
pub enum Direct {}

impl<'c, P: Inject<'c>> Mapping<'c, P> for Direct {
  fn provide(container: &'c Container) -> Result<P> {
    P::inject(container)
  }
}

/// A callable whose parameters the container can supply.
///
/// `Auto` is the tuple of parameter types resolved through `M`, `Explicit` the tuple of
/// trailing arguments passed by the caller. Implemented for every `FnOnce` of up to six
/// parameters in total.
pub trait Injectable<'c, M, Auto, Explicit> {
  type Output;

  fn call(self, container: &'c Container, explicit: Explicit) -> Result<Self::Output>;
}

macro_rules! impl_injectable {
  ([$($auto:ident),*], [$($explicit:ident),*]) => {
    #[allow(non_snake_case, unused_variables)]
    impl<'c, M, F, R, $($auto,)* $($explicit,)*> Injectable<'c, M, ($($auto,)*), ($($explicit,)*)> for F
    where
      F: FnOnce($($auto,)* $($explicit,)*) -> R,
      $(M: Mapping<'c, $auto>,)*
    {
      type Output = R;

      fn call(self, container: &'c Container, explicit: ($($explicit,)*)) -> Result<R> {
        let ($($explicit,)*) = explicit;
        $(let $auto = <M as Mapping<'c, $auto>>::provide(container)?;)*
        Ok(self($($auto,)* $($explicit,)*))
      }
    }
  };
}

impl_injectable!([], []);
impl_injectable!([A1], []);
impl_injectable!([], [E1]);
impl_injectable!([A1, A2], []);
impl_injectable!([A1], [E1]);
impl_injectable!([], [E1, E2]);
impl_injectable!([A1, A2, A3], []);
impl_injectable!([A1, A2], [E1]);
impl_injectable!([A1], [E1, E2]);
impl_injectable!([], [E1, E2, E3]);
impl_injectable!([A1, A2, A3, A4], []);
impl_injectable!([A1, A2, A3], [E1]);
impl_injectable!([A1, A2], [E1, E2]);
impl_injectable!([A1], [E1, E2, E3]);
impl_injectable!([], [E1, E2, E3, E4]);
impl_injectable!([A1, A2, A3, A4, A5], []);
impl_injectable!([A1, A2, A3, A4], [E1]);
impl_injectable!([A1, A2, A3], [E1, E2]);
impl_injectable!([A1, A2], [E1, E2, E3]);
impl_injectable!([A1], [E1, E2, E3, E4]);
impl_injectable!([], [E1, E2, E3, E4, E5]);
impl_injectable!([A1, A2, A3, A4, A5, A6], []);
impl_injectable!([A1, A2, A3, A4, A5], [E1]);
impl_injectable!([A1, A2, A3, A4], [E1, E2]);
impl_injectable!([A1, A2, A3], [E1, E2, E3]);
impl_injectable!([A1, A2], [E1, E2, E3, E4]);
impl_injectable!([A1], [E1, E2, E3, E4, E5]);
impl_injectable!([], [E1, E2, E3, E4, E5, E6]);
