//! Declared member definitions
//!
//! Fields, methods, and constructors as a class declares them. Method and
//! constructor bodies are native closures invoked with a [`CallCtx`]; an
//! interface method declaration carries no body.

use std::fmt;
use std::sync::Arc;

use crate::error::NativeError;
use crate::instance::Instance;
use crate::registry::{TypeId, TypeRegistry};
use crate::value::Value;

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Accessible from anywhere
    Public,
    /// Accessible from the declaring type and its subtypes
    Protected,
    /// Accessible from the declaring type only
    Private,
}

impl Visibility {
    /// Whether this is public visibility
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// Call context handed to a native member body
pub struct CallCtx<'a> {
    /// Registry the declaring type was loaded into
    pub registry: &'a TypeRegistry,
    /// Receiver value (None for static members and constructor-less calls)
    pub receiver: Option<&'a Value>,
    /// Argument values, post-resolution
    pub args: &'a [Value],
}

impl CallCtx<'_> {
    /// Argument at `index`, or an argument error
    pub fn arg(&self, index: usize) -> Result<&Value, NativeError> {
        self.args
            .get(index)
            .ok_or_else(|| NativeError::ArgumentError(format!("missing argument {index}")))
    }

    /// Argument at `index` as an `Int`
    pub fn arg_int(&self, index: usize) -> Result<i32, NativeError> {
        let value = self.arg(index)?;
        value.as_int().ok_or_else(|| NativeError::TypeMismatch {
            expected: "Int".to_string(),
            got: value.to_string(),
        })
    }

    /// Argument at `index` as a string slice
    pub fn arg_str(&self, index: usize) -> Result<&str, NativeError> {
        let value = self.arg(index)?;
        value.as_str().ok_or_else(|| NativeError::TypeMismatch {
            expected: "Str".to_string(),
            got: value.to_string(),
        })
    }

    /// Receiver value, or an argument error for a receiver-less call
    pub fn this(&self) -> Result<&Value, NativeError> {
        self.receiver
            .ok_or_else(|| NativeError::ArgumentError("missing receiver".to_string()))
    }

    /// Receiver as a live instance
    pub fn this_instance(&self) -> Result<&Instance, NativeError> {
        let receiver = self.this()?;
        receiver.as_instance().ok_or_else(|| NativeError::TypeMismatch {
            expected: "instance".to_string(),
            got: receiver.to_string(),
        })
    }
}

/// Native implementation of a method or constructor body
pub type NativeBody = Arc<dyn Fn(&CallCtx<'_>) -> Result<Value, NativeError> + Send + Sync>;

/// A field as declared on a type
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Declared value type
    pub ty: TypeId,
    /// Visibility
    pub visibility: Visibility,
    /// Whether the field lives on the type rather than on instances
    pub is_static: bool,
}

impl FieldDef {
    /// Declare an instance field
    pub fn new(name: impl Into<String>, ty: TypeId, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility,
            is_static: false,
        }
    }

    /// Mark as a static field
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A method as declared on a type
#[derive(Clone)]
pub struct MethodDef {
    /// Method name
    pub name: String,
    /// Ordered declared parameter types
    pub params: Vec<TypeId>,
    /// Declared return type (None for void)
    pub return_type: Option<TypeId>,
    /// Visibility
    pub visibility: Visibility,
    /// Whether the method dispatches without a receiver
    pub is_static: bool,
    /// Whether the last parameter accepts zero or more trailing arguments
    pub is_varargs: bool,
    /// Native body (None for an interface declaration)
    pub body: Option<NativeBody>,
}

impl MethodDef {
    /// Declare an instance method with a native body
    pub fn new(
        name: impl Into<String>,
        params: Vec<TypeId>,
        return_type: Option<TypeId>,
        visibility: Visibility,
        body: NativeBody,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
            visibility,
            is_static: false,
            is_varargs: false,
            body: Some(body),
        }
    }

    /// Declare a body-less method (interface declaration)
    pub fn declaration(
        name: impl Into<String>,
        params: Vec<TypeId>,
        return_type: Option<TypeId>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
            visibility: Visibility::Public,
            is_static: false,
            is_varargs: false,
            body: None,
        }
    }

    /// Mark as a static method
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark the trailing parameter as variable-arity
    pub fn varargs(mut self) -> Self {
        self.is_varargs = true;
        self
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .field("is_varargs", &self.is_varargs)
            .field("body", if self.body.is_some() { &"<native>" } else { &"<declaration>" })
            .finish()
    }
}

/// A constructor as declared on a type
#[derive(Clone)]
pub struct ConstructorDef {
    /// Ordered declared parameter types
    pub params: Vec<TypeId>,
    /// Visibility
    pub visibility: Visibility,
    /// Whether the last parameter accepts zero or more trailing arguments
    pub is_varargs: bool,
    /// Native body; receives the freshly allocated instance as receiver
    pub body: NativeBody,
}

impl ConstructorDef {
    /// Declare a constructor
    pub fn new(params: Vec<TypeId>, visibility: Visibility, body: NativeBody) -> Self {
        Self {
            params,
            visibility,
            is_varargs: false,
            body,
        }
    }

    /// Mark the trailing parameter as variable-arity
    pub fn varargs(mut self) -> Self {
        self.is_varargs = true;
        self
    }
}

impl fmt::Debug for ConstructorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDef")
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .field("is_varargs", &self.is_varargs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::standard_registry;

    #[test]
    fn test_call_ctx_args() {
        let registry = standard_registry();
        let args = vec![Value::Int(7), Value::str("hi")];
        let ctx = CallCtx {
            registry: &registry,
            receiver: None,
            args: &args,
        };

        assert_eq!(ctx.arg_int(0).unwrap(), 7);
        assert_eq!(ctx.arg_str(1).unwrap(), "hi");
        assert!(ctx.arg(2).is_err());
        assert!(ctx.arg_int(1).is_err());
        assert!(ctx.this().is_err());
    }

    #[test]
    fn test_method_def_flags() {
        let registry = standard_registry();
        let core = registry.core();

        let m = MethodDef::new(
            "f",
            vec![core.int],
            Some(core.int),
            Visibility::Public,
            Arc::new(|ctx| Ok(Value::Int(ctx.arg_int(0)? + 1))),
        )
        .as_static()
        .varargs();

        assert!(m.is_static);
        assert!(m.is_varargs);
        assert!(m.body.is_some());
        assert!(MethodDef::declaration("g", vec![], None).body.is_none());
    }
}
