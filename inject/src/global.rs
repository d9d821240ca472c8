//! The global container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;

// Created on first access.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the process-wide container.
///
/// # Examples
///
/// ```
/// use fibre_inject::{global, Abstract, Service};
///
/// struct Banner(&'static str);
/// impl Service for Banner {
///   type Kind = Abstract;
/// }
///
/// global().instance(Banner("Hello from global!"));
/// assert_eq!(global().service::<Banner>().unwrap().0, "Hello from global!");
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
