//! Post-construction hooks.
//!
//! A service lists its hooks in [`Service::autocall`]. The container walks the list once,
//! in declaration order, right after the factory returns and before the instance is
//! stored or handed to anyone. Each hook is a method taking `&mut Self` followed by
//! parameters the container resolves through the invocation engine.
//!
//! ```
//! use fibre_inject::{Autocall, Construct, Container, Result, Service, Single};
//! use std::sync::Arc;
//!
//! struct Settings {
//!   verbose: bool,
//! }
//! impl Service for Settings {
//!   type Kind = Single;
//! }
//! impl Construct for Settings {
//!   fn construct(_: &Container, _: ()) -> Result<Self> {
//!     Ok(Settings { verbose: true })
//!   }
//! }
//!
//! #[derive(Default)]
//! struct Reporter {
//!   verbose: bool,
//!   ready: bool,
//! }
//! impl Reporter {
//!   fn configure(&mut self, settings: Arc<Settings>) {
//!     self.verbose = settings.verbose;
//!   }
//!   fn start(&mut self) -> Result<()> {
//!     self.ready = true;
//!     Ok(())
//!   }
//! }
//! impl Service for Reporter {
//!   type Kind = Single;
//!
//!   fn autocall(hooks: &mut Autocall<'_, Self>) {
//!     hooks.call(Self::configure).call(Self::start);
//!   }
//! }
//! impl Construct for Reporter {
//!   fn construct(_: &Container, _: ()) -> Result<Self> {
//!     Ok(Reporter::default())
//!   }
//! }
//!
//! let container = Container::new();
//! let reporter = container.service::<Reporter>().unwrap();
//! assert!(reporter.verbose && reporter.ready);
//! ```
//!
//! [`Service::autocall`]: crate::Service::autocall

use crate::container::Container;
use crate::error::Result;
use crate::invoke::{Direct, Mapping};

/// What a hook may return.
pub trait HookOutput {
  fn into_result(self) -> Result<()>;
}

impl HookOutput for () {
  fn into_result(self) -> Result<()> {
    Ok(())
  }
}

impl HookOutput for Result<()> {
  fn into_result(self) -> Result<()> {
    self
  }
}

/// A method of `T` runnable as an autocall hook, with parameters `Params` resolved by `M`.
pub trait Hook<'c, T, M, Params> {
  fn run(self, service: &mut T, container: &'c Container) -> Result<()>;
}

macro_rules! impl_hook {
  ($($param:ident),*) => {
    #[allow(non_snake_case)]
    impl<'c, T, M, F, R, $($param,)*> Hook<'c, T, M, ($($param,)*)> for F
    where
      F: FnOnce(&mut T, $($param,)*) -> R,
      R: HookOutput,
      $(M: Mapping<'c, $param>,)*
    {
      fn run(self, service: &mut T, container: &'c Container) -> Result<()> {
        container
          .invoke_mapped::<M, _, _, _>(move |$($param: $param),*| self(service, $($param),*), ())?
          .into_result()
      }
    }
  };
}

impl_hook!();
impl_hook!(A1);
impl_hook!(A1, A2);
impl_hook!(A1, A2, A3);
impl_hook!(A1, A2, A3, A4);
impl_hook!(A1, A2, A3, A4, A5);
impl_hook!(A1, A2, A3, A4, A5, A6);

type BoxedHook<'c, T> = Box<dyn FnOnce(&mut T, &'c Container) -> Result<()> + 'c>;

/// The ordered hook chain of a service.
pub struct Autocall<'c, T> {
  hooks: Vec<BoxedHook<'c, T>>,
}

impl<'c, T: 'c> Autocall<'c, T> {
  pub(crate) fn new() -> Self {
    Self { hooks: Vec::new() }
  }

  /// Appends a hook whose parameters are resolved by their own types.
  pub fn call<F, P>(&mut self, hook: F) -> &mut Self
  where
    F: Hook<'c, T, Direct, P> + 'c,
    P: 'c,
  {
    self.call_mapped::<Direct, F, P>(hook)
  }

  /// Appends a hook whose parameters are resolved through the mapping `M`.
  pub fn call_mapped<M, F, P>(&mut self, hook: F) -> &mut Self
  where
    F: Hook<'c, T, M, P> + 'c,
    M: 'c,
    P: 'c,
  {
    self
      .hooks
      .push(Box::new(move |service: &mut T, container: &'c Container| {
        hook.run(service, container)
      }));
    self
  }

  pub fn len(&self) -> usize {
    self.hooks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.hooks.is_empty()
  }

  /// Runs every hook once, in order, stopping at the first error.
  pub(crate) fn run(self, service: &mut T, container: &'c Container) -> Result<()> {
    for hook in self.hooks {
      hook(service, container)?;
    }
    Ok(())
  }
}
