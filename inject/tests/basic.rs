use fibre_inject::{Abstract, Construct, Container, Error, Result, Service, Single, Transient};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// --- Test Fixtures ---

#[derive(Debug)]
struct Settings {
  name: String,
}

impl Service for Settings {
  type Kind = Abstract;
}

// A singleton with one injected dependency.
struct Greeter {
  settings: Arc<Settings>,
}

impl Greeter {
  fn greet(&self) -> String {
    format!("Hello, {}!", self.settings.name)
  }
}

impl Service for Greeter {
  type Kind = Single;
}

impl Construct for Greeter {
  fn construct(container: &Container, args: ()) -> Result<Self> {
    container.invoke(|settings: Arc<Settings>| Greeter { settings }, args)
  }
}

// A transient with mutable state, to observe independence.
struct Counter {
  value: Mutex<u32>,
}

impl Service for Counter {
  type Kind = Transient;
}

impl Construct for Counter {
  fn construct(_: &Container, _: ()) -> Result<Self> {
    Ok(Counter {
      value: Mutex::new(0),
    })
  }
}

// A transient that takes its trailing parameters from the caller.
struct Message {
  greeting: String,
  recipient: String,
  punctuation: char,
}

impl Service for Message {
  type Kind = Transient;
}

impl Construct<(String, char)> for Message {
  fn construct(container: &Container, args: (String, char)) -> Result<Self> {
    container.invoke(
      |greeter: Arc<Greeter>, recipient: String, punctuation: char| Message {
        greeting: greeter.greet(),
        recipient,
        punctuation,
      },
      args,
    )
  }
}

// --- Basic Tests ---

#[test]
fn test_singleton_resolves_to_the_same_instance() {
  // Arrange
  let container = Container::new();
  container.instance(Settings {
    name: "world".to_string(),
  });

  // Act
  let g1 = container.service::<Greeter>().unwrap();
  let g2 = container.service::<Greeter>().unwrap();

  // Assert
  assert_eq!(g1.greet(), "Hello, world!");
  assert!(Arc::ptr_eq(&g1, &g2));
}

#[test]
fn test_singleton_dependencies_are_shared() {
  let container = Container::new();
  let settings = container.instance(Settings {
    name: "shared".to_string(),
  });

  let greeter = container.service::<Greeter>().unwrap();

  assert!(Arc::ptr_eq(&greeter.settings, &settings));
}

#[test]
fn test_transients_are_independent() {
  let container = Container::new();

  let c1: Counter = container.service::<Counter>().unwrap();
  let c2: Counter = container.service::<Counter>().unwrap();
  *c1.value.lock().unwrap() = 42;

  assert_eq!(*c1.value.lock().unwrap(), 42);
  assert_eq!(*c2.value.lock().unwrap(), 0);
  // Transients are never stored.
  assert!(!container.contains::<Counter>());
  assert!(container.is_empty());
}

#[test]
fn test_transient_with_trailing_arguments() {
  let container = Container::new();
  container.instance(Settings {
    name: "ada".to_string(),
  });

  let message = container
    .service_with::<Message, _>(("Grace".to_string(), '!'))
    .unwrap();

  assert_eq!(message.greeting, "Hello, ada!");
  assert_eq!(message.recipient, "Grace");
  assert_eq!(message.punctuation, '!');
}

#[test]
fn test_abstract_without_registration_fails_and_leaves_no_state() {
  // Arrange
  let container = Container::new();

  // Act: both the abstract service and a singleton depending on it fail.
  let direct = container.service::<Settings>();
  let dependent = container.service::<Greeter>();

  // Assert
  assert!(matches!(direct, Err(Error::NoInstanceAvailable { .. })));
  assert!(matches!(dependent, Err(Error::NoInstanceAvailable { .. })));
  assert!(!container.contains::<Greeter>());
  assert!(container.is_empty());

  // A later registration is fully usable.
  container.instance(Settings {
    name: "late".to_string(),
  });
  assert_eq!(container.service::<Greeter>().unwrap().greet(), "Hello, late!");
}

#[test]
fn test_instance_replaces_previous_registration() {
  let container = Container::new();
  container.instance(Settings {
    name: "first".to_string(),
  });
  container.instance(Settings {
    name: "second".to_string(),
  });

  assert_eq!(container.service::<Settings>().unwrap().name, "second");
}

// --- Explicit construction ---

struct Port {
  number: u16,
}

impl Service for Port {
  type Kind = Abstract;
}

impl Construct<(u16,)> for Port {
  fn construct(_: &Container, (number,): (u16,)) -> Result<Self> {
    Ok(Port { number })
  }
}

#[test]
fn test_instance_with_constructs_and_registers_immediately() {
  let container = Container::new();

  let port = container.instance_with::<Port, _>((8080,)).unwrap();

  assert_eq!(port.number, 8080);
  assert!(Arc::ptr_eq(&port, &container.service::<Port>().unwrap()));
}

// --- Failures ---

#[derive(Debug)]
struct InvalidUrl(String);

impl std::fmt::Display for InvalidUrl {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "invalid url: {}", self.0)
  }
}

impl std::error::Error for InvalidUrl {}

static CONNECTION_ATTEMPTS: AtomicUsize = AtomicUsize::new(0);

struct Connection;

impl Service for Connection {
  type Kind = Single;
}

impl Construct for Connection {
  fn construct(container: &Container, args: ()) -> Result<Self> {
    CONNECTION_ATTEMPTS.fetch_add(1, Ordering::SeqCst);
    let settings = container.service::<Settings>()?;
    if settings.name.contains(' ') {
      return Err(Error::construction(InvalidUrl(settings.name.clone())));
    }
    container.invoke(|| Connection, args)
  }
}

#[test]
fn test_construction_failure_propagates_unmodified() {
  // Arrange
  let container = Container::new();
  container.instance(Settings {
    name: "not a url".to_string(),
  });

  // Act
  let error = match container.service::<Connection>() {
    Err(error) => error,
    Ok(_) => panic!("construction should fail"),
  };

  // Assert
  assert_eq!(error.to_string(), "invalid url: not a url");
  match error {
    Error::Construction(inner) => assert!(inner.downcast_ref::<InvalidUrl>().is_some()),
    other => panic!("unexpected error: {other:?}"),
  }
  assert!(!container.contains::<Connection>());

  // Nothing was cached, so the factory runs again once the input is fixed.
  let before = CONNECTION_ATTEMPTS.load(Ordering::SeqCst);
  container.instance(Settings {
    name: "db.local".to_string(),
  });
  assert!(container.service::<Connection>().is_ok());
  assert_eq!(CONNECTION_ATTEMPTS.load(Ordering::SeqCst), before + 1);
}
