use fibre_inject::{Abstract, Construct, Container, Overrides, Result, Service, Single};
use std::sync::Arc;

// --- Abstraction and Implementation ---
trait Logger: Send + Sync {
  fn log(&self, message: &str) -> String;
}

impl Service for dyn Logger {
  type Kind = Abstract;
}

struct ConsoleLogger {
  prefix: String,
}

impl Logger for ConsoleLogger {
  fn log(&self, message: &str) -> String {
    format!("{}{}", self.prefix, message)
  }
}

// Resolving `ConsoleLogger` also registers it as `dyn Logger`.
impl Service for ConsoleLogger {
  type Kind = Single;

  fn overrides(aliases: &mut Overrides<Self>) {
    aliases.add::<dyn Logger>(|logger| logger);
  }
}

impl Construct for ConsoleLogger {
  fn construct(_: &Container, _: ()) -> Result<Self> {
    Ok(ConsoleLogger {
      prefix: "[console] ".to_string(),
    })
  }
}

// --- A consumer that only knows the abstraction ---
struct UserService {
  logger: Arc<dyn Logger>,
}

impl UserService {
  fn create_user(&self, name: &str) -> String {
    self.logger.log(&format!("Creating user: {}", name))
  }
}

impl Service for UserService {
  type Kind = Single;
}

impl Construct for UserService {
  fn construct(container: &Container, args: ()) -> Result<Self> {
    container.invoke(|logger: Arc<dyn Logger>| UserService { logger }, args)
  }
}

fn main() {
  let container = Container::new();

  // `dyn Logger` is abstract: nothing provides it yet.
  match container.service::<UserService>() {
    Ok(_) => panic!("dyn Logger should not be available yet"),
    Err(error) => println!("Before override: {}", error),
  }

  // Building the concrete logger registers the override.
  container.service::<ConsoleLogger>().unwrap();

  let users = container.service::<UserService>().unwrap();
  let output = users.create_user("Alice");
  println!("{}", output);
  assert_eq!(output, "[console] Creating user: Alice");
}
