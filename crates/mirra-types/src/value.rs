//! Dynamic runtime values
//!
//! `Value` is the engine's argument, receiver, field, and return
//! representation. Equality and display follow the wrapped payload; instances
//! compare by identity.

use std::fmt;

use crate::instance::Instance;
use crate::registry::{TypeId, TypeRegistry};

/// A dynamic runtime value
#[derive(Debug, Clone)]
pub enum Value {
    /// The null reference
    Null,
    /// Boolean
    Bool(bool),
    /// 32-bit integer, boxed as `Int`
    Int(i32),
    /// 64-bit integer, boxed as `Long`
    Long(i64),
    /// 64-bit float, boxed as `Double`
    Double(f64),
    /// String
    Str(String),
    /// Live instance of a registered class
    Instance(Instance),
}

impl Value {
    /// Build a string value
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Whether this is the null reference
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Boxed runtime type of this value, or `None` for null
    pub fn runtime_type(&self, registry: &TypeRegistry) -> Option<TypeId> {
        let core = registry.core();
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(core.boolean),
            Value::Int(_) => Some(core.int),
            Value::Long(_) => Some(core.long),
            Value::Double(_) => Some(core.double),
            Value::Str(_) => Some(core.str),
            Value::Instance(inst) => Some(inst.class()),
        }
    }

    /// Payload as bool, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Payload as i32, if this is an `Int`
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Payload as i64, if this is a `Long`
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Payload as f64, if this is a `Double`
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Payload as string slice, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Payload as a live instance, if this is one
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(inst) => Some(inst),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Long(l) => write!(f, "{l}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Instance(inst) => write!(f, "<instance #{}>", inst.class().index()),
        }
    }
}
