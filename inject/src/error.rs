use thiserror::Error;

/// Boxed error raised by a service's own factory or hook.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type for `fibre_inject` operations.
#[derive(Debug, Error)]
pub enum Error {
  /// An abstract service was requested but nothing was registered under its identity.
  #[error("No instance available for abstract service: {service}")]
  NoInstanceAvailable { service: &'static str },

  /// A container-scoped accessor needs a capability this container was not created with.
  #[error("Cannot bind {accessor}: container does not provide {capability}")]
  InvalidAccessorBinding {
    accessor: &'static str,
    capability: &'static str,
  },

  /// The service is already being constructed further up the current resolution.
  #[error("Circular dependency detected while resolving service: {service}")]
  CircularDependency { service: &'static str },

  /// A factory or autocall hook failed. The original error is kept as-is.
  #[error(transparent)]
  Construction(BoxError),
}

impl Error {
  /// Wraps an error raised by user code inside a factory or hook.
  pub fn construction(error: impl Into<BoxError>) -> Self {
    Error::Construction(error.into())
  }

  pub(crate) fn no_instance<T: ?Sized>() -> Self {
    Error::NoInstanceAvailable {
      service: std::any::type_name::<T>(),
    }
  }
}

/// A specialized `Result` type for `fibre_inject` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug)]
  struct DiskFull;

  impl std::fmt::Display for DiskFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.write_str("disk full")
    }
  }

  impl std::error::Error for DiskFull {}

  #[test]
  fn construction_error_keeps_original_message() {
    let err = Error::construction(DiskFull);
    assert_eq!(err.to_string(), "disk full");

    match err {
      Error::Construction(inner) => assert!(inner.downcast_ref::<DiskFull>().is_some()),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn construction_accepts_plain_strings() {
    let err = Error::construction("bad port");
    assert_eq!(err.to_string(), "bad port");
  }

  #[test]
  fn no_instance_names_the_service() {
    trait Storage {}
    let err = Error::no_instance::<dyn Storage>();
    assert!(err.to_string().contains("Storage"));
  }
}
