//! Fluent class construction
//!
//! `ClassBuilder` assembles a `TypeDef` member by member and registers it.
//! Classes without an explicit `extends` default to the core root class,
//! mirroring implicit-Object inheritance.

use crate::members::{ConstructorDef, FieldDef, MethodDef};
use crate::registry::{TypeDef, TypeId, TypeKind, TypeRegistry};

/// Builder for a class or interface descriptor
#[derive(Debug)]
pub struct ClassBuilder {
    name: String,
    kind: TypeKind,
    superclass: Option<TypeId>,
    interfaces: Vec<TypeId>,
    fields: Vec<FieldDef>,
    methods: Vec<MethodDef>,
    constructors: Vec<ConstructorDef>,
}

impl ClassBuilder {
    /// Start building a class
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name.into(), TypeKind::Class)
    }

    /// Start building an interface
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name.into(), TypeKind::Interface)
    }

    fn new(name: String, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Set the superclass
    pub fn extends(mut self, superclass: TypeId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Add an implemented (or, for interfaces, extended) interface
    pub fn implements(mut self, interface: TypeId) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Declare a field
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a method
    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Declare a constructor
    pub fn constructor(mut self, constructor: ConstructorDef) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Register the finished descriptor and return its id
    pub fn register(self, registry: &mut TypeRegistry) -> TypeId {
        let mut def = TypeDef::new(self.name, self.kind);
        def.superclass = match self.kind {
            TypeKind::Class => self.superclass.or(Some(registry.core().object)),
            _ => self.superclass,
        };
        def.interfaces = self.interfaces;
        def.fields = self.fields;
        def.methods = self.methods;
        def.constructors = self.constructors;
        registry.register(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::standard_registry;
    use crate::members::Visibility;
    use crate::value::Value;
    use std::sync::Arc;

    #[test]
    fn test_class_defaults_to_object_superclass() {
        let mut registry = standard_registry();
        let id = ClassBuilder::class("Point").register(&mut registry);

        let def = registry.get(id).unwrap();
        assert_eq!(def.superclass, Some(registry.core().object));
        assert_eq!(registry.lookup("Point"), Some(id));
    }

    #[test]
    fn test_interface_has_no_superclass() {
        let mut registry = standard_registry();
        let id = ClassBuilder::interface("Shape").register(&mut registry);

        assert_eq!(registry.get(id).unwrap().superclass, None);
        assert_eq!(registry.get(id).unwrap().kind, TypeKind::Interface);
    }

    #[test]
    fn test_members_are_recorded() {
        let mut registry = standard_registry();
        let core_int = registry.core().int;
        let id = ClassBuilder::class("Counter")
            .field(FieldDef::new("count", core_int, Visibility::Private))
            .method(MethodDef::new(
                "bump",
                vec![],
                None,
                Visibility::Public,
                Arc::new(|_| Ok(Value::Null)),
            ))
            .register(&mut registry);

        let def = registry.get(id).unwrap();
        assert_eq!(def.fields.len(), 1);
        assert_eq!(def.methods.len(), 1);
        assert!(def.constructors.is_empty());
    }
}
