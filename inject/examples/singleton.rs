use fibre_inject::{global, resolve, Construct, Container, Result, Service, Single, Transient};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

// Built once per container.
struct RequestTracker {
  id: usize,
}

impl Service for RequestTracker {
  type Kind = Single;
}

impl Construct for RequestTracker {
  fn construct(_: &Container, _: ()) -> Result<Self> {
    println!("Creating SINGLETON RequestTracker...");
    Ok(RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    })
  }
}

// Built on every request.
struct Request {
  id: usize,
  tracker: Arc<RequestTracker>,
}

impl Service for Request {
  type Kind = Transient;
}

impl Construct for Request {
  fn construct(container: &Container, args: ()) -> Result<Self> {
    container.invoke(
      |tracker: Arc<RequestTracker>| {
        println!("Creating TRANSIENT Request...");
        Request {
          id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
          tracker,
        }
      },
      args,
    )
  }
}

fn main() {
  println!("--- Resolving Singletons ---");
  let s1 = resolve!(RequestTracker);
  let s2 = resolve!(RequestTracker);
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert!(
    Arc::ptr_eq(&s1, &s2),
    "Singleton instances should be identical"
  );
  println!("Singleton instances are the same pointer, as expected.\n");

  println!("--- Resolving Transients ---");
  let t1 = resolve!(Request);
  let t2 = resolve!(Request);
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 1);
  assert_eq!(t2.id, 2);
  assert!(Arc::ptr_eq(&t1.tracker, &t2.tracker));
  assert!(!global().contains::<Request>(), "Transients are never stored");
  println!("Transients are distinct and share the same tracker, as expected.");
}
