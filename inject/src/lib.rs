//! # Fibre Inject
//!
//! A dependency-injection container for Rust that wires services together from the
//! parameters their factories declare.
//!
//! ## Core Concepts
//!
//! - **Service**: a type implementing [`Service`]. Its [`Kind`](Service::Kind) is
//!   [`Single`] (one shared instance per container), [`Transient`] (a new value on every
//!   request) or [`Abstract`] (shared, but only resolvable once something was registered).
//! - **Factory**: [`Construct::construct`]. Most factories forward to
//!   [`Container::invoke`], which resolves the callable's parameters from the container.
//! - **Overrides**: a singleton may also be registered under parent identities such as
//!   `dyn Trait`, all pointing at the one instance.
//! - **Autocall**: methods run right after construction, with injected parameters.
//! - **Scopes**: [`Container::fork`] creates a child that sees the parent's instances but
//!   keeps its own, until [`Container::merge`] hands them back.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_inject::{Abstract, Construct, Container, Overrides, Result, Service, Single};
//! use std::sync::Arc;
//!
//! struct Config {
//!   url: String,
//! }
//! impl Service for Config {
//!   type Kind = Abstract;
//! }
//!
//! trait Repository: Send + Sync {
//!   fn describe(&self) -> String;
//! }
//! impl Service for dyn Repository {
//!   type Kind = Abstract;
//! }
//!
//! struct Database {
//!   url: String,
//! }
//! impl Repository for Database {
//!   fn describe(&self) -> String {
//!     format!("db at {}", self.url)
//!   }
//! }
//! impl Service for Database {
//!   type Kind = Single;
//!
//!   fn overrides(aliases: &mut Overrides<Self>) {
//!     aliases.add::<dyn Repository>(|db| db);
//!   }
//! }
//! impl Construct for Database {
//!   fn construct(container: &Container, args: ()) -> Result<Self> {
//!     container.invoke(|config: Arc<Config>| Database { url: config.url.clone() }, args)
//!   }
//! }
//!
//! let container = Container::new();
//! container.instance(Config { url: "postgres://localhost".to_string() });
//!
//! let db = container.service::<Database>().unwrap();
//! let repo = container.service::<dyn Repository>().unwrap();
//! assert_eq!(repo.describe(), "db at postgres://localhost");
//! assert_eq!(db.url, "postgres://localhost");
//! ```

mod autocall;
mod container;
mod error;
mod global;
mod identity;
mod inject;
mod invoke;
mod macros;
mod overrides;
mod service;
mod store;

pub use autocall::{Autocall, Hook, HookOutput};
pub use container::Container;
pub use error::{BoxError, Error, Result};
pub use global::global;
pub use inject::{Extension, Fork, Inject};
pub use invoke::{Direct, Injectable, Mapping};
pub use overrides::Overrides;
pub use service::{
  Abstract, Construct, Kind, Service, ServiceKind, ServiceType, Shared, Single, Transient,
};
