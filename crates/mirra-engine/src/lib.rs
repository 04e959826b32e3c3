//! Mirra Resolution Engine
//!
//! Given a target (a type, or a type plus a live instance) and a symbolic
//! member name, plus runtime argument values, the engine locates the single
//! best-matching declared field, method, or constructor across the full
//! ancestor hierarchy (honoring visibility, shadowing, and overload
//! ambiguity), performs the access or invocation, and wraps the result for
//! further chained resolution.
//!
//! - **Catalog**: per-name member buckets across hierarchy levels (`catalog`)
//! - **Matcher**: assignability and specificity distance (`matcher`)
//! - **Selector**: minimum-distance pick with explicit ambiguity (`selector`)
//! - **Access**: call-scoped visibility relaxation (`access`)
//! - **Handle**: value-plus-type wrapper for chaining (`handle`)
//! - **View**: interface-shaped redispatching adapter (`view`)
//!
//! # Example
//!
//! ```rust,ignore
//! use mirra_engine::Engine;
//! use mirra_types::{standard_registry, Value};
//!
//! let engine = Engine::new(standard_registry());
//! let result = engine
//!     .construct_named("Person", vec![Value::str("Ada")])?
//!     .call("greet", vec![])?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod access;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod handle;
pub mod matcher;
pub mod selector;
pub mod view;

pub use access::{AccessKind, AccessPolicy, AccessRequest, AllowAll};
pub use catalog::{Catalog, CatalogCache, MemberDescriptor, MemberKind, CTOR_NAME};
pub use engine::Engine;
pub use error::{ResolveError, Result};
pub use handle::Handle;
pub use matcher::{assignment_distance, DeclarationMatcher, MatchResult, NOT_ASSIGNABLE};
pub use selector::{select_best, SelectionError};
pub use view::CapabilityView;
