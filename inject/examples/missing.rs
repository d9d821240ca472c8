use fibre_inject::{global, resolve, Abstract, Error, Service};
use std::panic;

struct UnregisteredService;

impl Service for UnregisteredService {
  type Kind = Abstract;
}

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(UnregisteredService);
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `service()` method ---
  println!("\nNow, attempting to resolve using the fallible `service()` method...");

  match global().service::<UnregisteredService>() {
    Ok(_) => panic!("Should not have found the service!"),
    Err(Error::NoInstanceAvailable { service }) => {
      println!("Correctly received an error for the missing service: {}", service)
    }
    Err(other) => panic!("Unexpected error: {}", other),
  }
}
