//! Mirra Loaded Type Model
//!
//! This crate provides the data the resolution engine operates on:
//! - **Registry**: type descriptors with ancestor/interface edges (`registry` module)
//! - **Members**: declared fields, methods, and constructors (`members` module)
//! - **Values**: dynamic runtime values and live instances (`value`, `instance` modules)
//! - **Builder**: fluent class construction (`builder` module)
//! - **Bootstrap**: the standard core types (`bootstrap` module)
//!
//! A loaded type is immutable after registration; only static field storage
//! and instance field slots are mutable, behind their own locks.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bootstrap;
pub mod builder;
pub mod error;
pub mod instance;
pub mod members;
pub mod registry;
pub mod value;

pub use bootstrap::{standard_registry, CoreTypes};
pub use builder::ClassBuilder;
pub use error::NativeError;
pub use instance::Instance;
pub use members::{CallCtx, ConstructorDef, FieldDef, MethodDef, NativeBody, Visibility};
pub use registry::{TypeDef, TypeId, TypeKind, TypeRegistry};
pub use value::Value;
