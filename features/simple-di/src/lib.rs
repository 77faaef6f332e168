//! Simple DI is a minimal dependency injection container for constructor injected singletons.
//!
//! Simple DI consists of the following components:
//!
//! 1. [DiContainer] - holds one singleton per type, builds missing ones on demand
//! 2. [Construct] - the single constructor of a type, declaring its dependencies
//! 3. [Resolver]s - how one constructor parameter is injected (`Arc<T>`, [Lazy])
//! 4. Errors - for binding and resolution failures
//!
//! A type can depend on itself through [Lazy]. The dependency is only resolved on first
//! access, after the instance was constructed and cached.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use simple_di::{Construct, DiContainer, DynError, Lazy};
//!
//! struct Settings {
//!     name: String,
//! }
//!
//! struct Service {
//!     settings: Arc<Settings>,
//!     this: Lazy<Service>,
//! }
//! impl Construct for Service {
//!     type Dependencies = (Arc<Settings>, Lazy<Service>);
//!
//!     fn construct((settings, this): Self::Dependencies) -> Result<Self, DynError> {
//!         Ok(Service { settings, this })
//!     }
//! }
//!
//! let container = DiContainer::new();
//! container
//!     .bind(Settings { name: "app".to_string() })
//!     .unwrap();
//! container.register::<Service>();
//!
//! let service = container.resolve::<Service>().unwrap();
//! assert_eq!(service.settings.name, "app");
//! assert!(Arc::ptr_eq(service.this.get(), &service));
//! ```

pub mod constructor;
pub mod container;
pub mod errors;
pub mod resolver;
pub mod types;

pub use constructor::{Construct, Dependencies};
pub use container::DiContainer;
pub use errors::{BindError, ConstructorError, ResolveError};
pub use resolver::{Deferred, Lazy, Resolved, Resolver};
pub use types::{DynError, Injectable, Instance, TypeInfo};
