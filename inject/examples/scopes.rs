use fibre_inject::{Abstract, Construct, Container, Result, Service, Single};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct Settings {
  name: &'static str,
}

impl Service for Settings {
  type Kind = Abstract;
}

struct Session {
  settings: Arc<Settings>,
}

impl Drop for Session {
  fn drop(&mut self) {
    println!("Dropping session for {}", self.settings.name);
  }
}

impl Service for Session {
  type Kind = Single;
}

impl Construct for Session {
  fn construct(container: &Container, args: ()) -> Result<Self> {
    container.invoke(|settings: Arc<Settings>| Session { settings }, args)
  }
}

fn main() {
  // Run with RUST_LOG=fibre_inject=trace to follow construction and teardown.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let app = Container::new();
  app.instance(Settings { name: "app" });

  // --- A scope that is thrown away ---
  {
    let request = app.fork();
    let session = request.service::<Session>().unwrap();
    println!("Request scope built a session for {}", session.settings.name);
    assert!(!app.contains::<Session>());
  }
  println!("Request scope dropped.\n");

  // --- A scope that is kept ---
  let setup = app.fork();
  let session = setup.service::<Session>().unwrap();
  app.merge(setup);
  assert!(Arc::ptr_eq(&app.service::<Session>().unwrap(), &session));
  println!("Merged the setup scope into the application container.");

  drop(session);
  app.clear();
  println!("Application container cleared.");
}
