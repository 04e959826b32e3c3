//! Capability views
//!
//! A `CapabilityView` adapts one target to one interface: each call is
//! validated against the interface's declared methods, then redispatched
//! through the engine's `invoke`. When the target class declares no such
//! method, getter/setter/bare property names fall back to field access, so
//! an interface like `Named { getName(): Str }` can view a plain data
//! object.

use std::fmt;
use std::sync::Arc;

use mirra_types::{TypeId, Value};

use crate::engine::Engine;
use crate::error::{ResolveError, Result};
use crate::handle::Handle;

/// An interface-shaped adapter over one target handle
pub struct CapabilityView {
    engine: Arc<Engine>,
    target: Handle,
    interface: TypeId,
}

impl CapabilityView {
    pub(crate) fn new(engine: Arc<Engine>, target: Handle, interface: TypeId) -> Self {
        Self {
            engine,
            target,
            interface,
        }
    }

    /// The interface this view exposes
    pub fn interface(&self) -> TypeId {
        self.interface
    }

    /// The underlying target
    pub fn target(&self) -> &Handle {
        &self.target
    }

    /// Call an interface-declared method on the underlying target
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Handle> {
        if !self.declares(name) {
            return Err(ResolveError::NoSuchMember {
                type_name: self.engine.type_name(self.interface),
                name: name.to_string(),
            });
        }
        match self.engine.invoke(&self.target, name, args.clone()) {
            Err(ResolveError::NoSuchMember { .. }) => self.property_fallback(name, args),
            other => other,
        }
    }

    /// Whether the interface (or an interface it extends) declares `name`
    fn declares(&self, name: &str) -> bool {
        let registry = self.engine.registry();
        let mut pending = vec![self.interface];
        let mut visited = vec![];
        while let Some(current) = pending.pop() {
            if visited.contains(&current) {
                continue;
            }
            visited.push(current);
            let Some(def) = registry.get(current) else {
                continue;
            };
            if def.methods.iter().any(|m| m.name == name) {
                return true;
            }
            pending.extend(def.interfaces.iter().copied());
        }
        false
    }

    /// Map `getX`/`setX`/bare `x` onto the field `x` of the target
    fn property_fallback(&self, name: &str, args: Vec<Value>) -> Result<Handle> {
        if let Some(property) = name.strip_prefix("get") {
            if args.is_empty() && !property.is_empty() {
                return self.target.field(&decapitalize(property));
            }
        }
        if let Some(property) = name.strip_prefix("set") {
            if args.len() == 1 && !property.is_empty() {
                let mut args = args;
                let value = args.remove(0);
                return self.target.set(&decapitalize(property), value);
            }
        }
        match args.len() {
            0 => self.target.field(name),
            1 => {
                let mut args = args;
                let value = args.remove(0);
                self.target.set(name, value)
            }
            _ => Err(ResolveError::NoSuchMember {
                type_name: self.target.type_name(),
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Debug for CapabilityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityView")
            .field("interface", &self.interface)
            .field("target", &self.target)
            .finish()
    }
}

fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decapitalize() {
        assert_eq!(decapitalize("Name"), "name");
        assert_eq!(decapitalize("x"), "x");
        assert_eq!(decapitalize(""), "");
    }
}
