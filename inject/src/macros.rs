//! Public macros for ergonomic service resolution.

/// Resolves a service from the global container.
///
/// # Panics
///
/// Panics with the resolution error if the service cannot be resolved. For a
/// non-panicking version, use `global().service::<T>()` directly.
///
/// # Examples
///
/// ```
/// use fibre_inject::{global, resolve, Abstract, Service};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///   fn greet(&self) -> String;
/// }
/// impl Service for dyn Greeter {
///   type Kind = Abstract;
/// }
///
/// struct English;
/// impl Greeter for English {
///   fn greet(&self) -> String {
///     "Hello!".to_string()
///   }
/// }
///
/// global().instance_shared::<dyn Greeter>(Arc::new(English));
///
/// let greeter = resolve!(trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  // resolve!(trait MyTrait)
  (trait $trait_ident:ident) => {
    $crate::global()
      .service::<dyn $trait_ident>()
      .unwrap_or_else(|error| {
        panic!(
          "Failed to resolve required trait service {}: {}",
          std::any::type_name::<dyn $trait_ident>(),
          error
        )
      })
  };

  // resolve!(MyService)
  ($type:ty) => {
    $crate::global()
      .service::<$type>()
      .unwrap_or_else(|error| {
        panic!(
          "Failed to resolve required service {}: {}",
          std::any::type_name::<$type>(),
          error
        )
      })
  };
}
