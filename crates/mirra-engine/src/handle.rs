//! Handle/Result Wrapper
//!
//! A `Handle` is the immutable wrapper every resolution operation produces
//! and the sole input the next chained operation accepts. It carries the
//! resolved value together with its static type, which matters when the
//! type cannot be derived from the value alone: a null field value keeps
//! its declared type so chained resolution and default queries still work.
//!
//! Equality and display delegate to the wrapped value; a null-wrapping
//! handle prints `null`, distinct from absence (which is an error).

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use mirra_types::{TypeId, Value};

use crate::engine::Engine;
use crate::error::{ResolveError, Result};
use crate::view::CapabilityView;

/// A resolved value paired with its static type, chainable through the engine
#[derive(Clone)]
pub struct Handle {
    engine: Arc<Engine>,
    value: Value,
    static_type: TypeId,
}

impl Handle {
    pub(crate) fn new(engine: Arc<Engine>, value: Value, static_type: TypeId) -> Self {
        Self {
            engine,
            value,
            static_type,
        }
    }

    /// The wrapped value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Unwrap into the value
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Whether the wrapped value is null
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Static type of the wrapped value; for non-null values this is the
    /// runtime type, for null the declared type that produced it
    pub fn type_of(&self) -> TypeId {
        self.static_type
    }

    /// Name of the static type
    pub fn type_name(&self) -> String {
        self.engine.type_name(self.static_type)
    }

    /// Re-type this target to start resolution at `ty`, for
    /// declaring-type-qualified access to shadowed base members
    pub fn as_type(&self, ty: TypeId) -> Result<Handle> {
        if self.engine.registry().get(ty).is_none() {
            return Err(ResolveError::UnknownType {
                name: format!("#{}", ty.index()),
            });
        }
        Ok(Handle::new(self.engine.clone(), self.value.clone(), ty))
    }

    /// Re-type this target by type name
    pub fn as_type_named(&self, name: &str) -> Result<Handle> {
        let ty = self
            .engine
            .registry()
            .lookup(name)
            .ok_or_else(|| ResolveError::UnknownType {
                name: name.to_string(),
            })?;
        self.as_type(ty)
    }

    /// Resolve and read the field `name`
    pub fn field(&self, name: &str) -> Result<Handle> {
        self.engine.resolve_field(self, name)
    }

    /// Resolve the field `name` and write `value`; returns the target for
    /// further chaining
    pub fn set(&self, name: &str, value: Value) -> Result<Handle> {
        self.engine.set_field(self, name, value)
    }

    /// Point-in-time snapshot of every resolvable field
    pub fn fields(&self) -> Result<FxHashMap<String, Handle>> {
        self.engine.resolve_all_fields(self)
    }

    /// Invoke the best-matching overload of `name`
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Handle> {
        self.engine.invoke(self, name, args)
    }

    /// Invoke the method with exactly the declared parameter types,
    /// bypassing overload inference
    pub fn call_typed(
        &self,
        name: &str,
        param_types: &[TypeId],
        args: Vec<Value>,
    ) -> Result<Handle> {
        self.engine.invoke_typed(self, name, param_types, args)
    }

    /// Materialize a capability view of this target through an interface
    pub fn view(&self, interface: TypeId) -> Result<CapabilityView> {
        self.engine.materialize_view(self, interface)
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("value", &self.value)
            .field("static_type", &self.static_type)
            .finish()
    }
}
