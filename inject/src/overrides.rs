//! Override declarations: extra identities a singleton is registered under.

use crate::identity::ServiceKey;
use crate::store::Erased;
use std::sync::Arc;

/// The parent identities declared by a service in [`Service::overrides`].
///
/// Each parent gets its own registry entry holding a view of the one constructed instance.
/// Views are `Arc<P>` pointers into the same allocation, so every identity observes the
/// same state.
///
/// ```
/// use fibre_inject::{Abstract, Overrides, Service, Single};
/// # use fibre_inject::{Construct, Container, Result};
///
/// trait Clock: Send + Sync {}
/// impl Service for dyn Clock {
///   type Kind = Abstract;
/// }
///
/// struct SystemClock;
/// impl Clock for SystemClock {}
/// impl Service for SystemClock {
///   type Kind = Single;
///
///   fn overrides(aliases: &mut Overrides<Self>) {
///     aliases.add::<dyn Clock>(|clock| clock);
///   }
/// }
/// # impl Construct for SystemClock {
/// #   fn construct(_: &Container, _: ()) -> Result<Self> { Ok(SystemClock) }
/// # }
/// ```
///
/// [`Service::overrides`]: crate::Service::overrides
pub struct Overrides<T> {
  views: Vec<View<T>>,
}

struct View<T> {
  key: ServiceKey,
  adapt: Box<dyn Fn(&Arc<T>) -> Erased>,
}

impl<T: Send + Sync + 'static> Overrides<T> {
  pub(crate) fn new() -> Self {
    Self { views: Vec::new() }
  }

  /// Registers the service under `P` as well, using `adapt` to view it as a `P`.
  ///
  /// `adapt` is normally the identity closure, which coerces `Arc<T>` to `Arc<dyn P>`.
  pub fn add<P>(&mut self, adapt: fn(Arc<T>) -> Arc<P>) -> &mut Self
  where
    P: ?Sized + Send + Sync + 'static,
  {
    self.views.push(View {
      key: ServiceKey::of::<P>(),
      adapt: Box::new(move |service| Arc::new(adapt(Arc::clone(service))) as Erased),
    });
    self
  }

  pub fn len(&self) -> usize {
    self.views.len()
  }

  pub fn is_empty(&self) -> bool {
    self.views.is_empty()
  }

  /// The view entries for `service`, in declaration order.
  pub(crate) fn views<'a>(
    &'a self,
    service: &'a Arc<T>,
  ) -> impl Iterator<Item = (ServiceKey, Erased)> + 'a {
    self
      .views
      .iter()
      .map(move |view| (view.key, (view.adapt)(service)))
  }
}
