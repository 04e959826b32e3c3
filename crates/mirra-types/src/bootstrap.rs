//! Standard registry bootstrap
//!
//! Every registry starts from the same core: `Object` at the root, `Number`
//! under it with the numeric boxes `Int`/`Long`/`Double`, `Boolean` and
//! `Str` directly under `Object`, and the unboxed primitives paired with
//! their boxes.

use crate::registry::{TypeDef, TypeId, TypeKind, TypeRegistry};

/// Ids of the bootstrap core types
#[derive(Debug, Clone, Copy)]
pub struct CoreTypes {
    /// Root class
    pub object: TypeId,
    /// Abstract numeric superclass
    pub number: TypeId,
    /// Boxed 32-bit integer
    pub int: TypeId,
    /// Boxed 64-bit integer
    pub long: TypeId,
    /// Boxed 64-bit float
    pub double: TypeId,
    /// Boxed boolean
    pub boolean: TypeId,
    /// String class
    pub str: TypeId,
    /// Unboxed 32-bit integer
    pub prim_int: TypeId,
    /// Unboxed 64-bit integer
    pub prim_long: TypeId,
    /// Unboxed 64-bit float
    pub prim_double: TypeId,
    /// Unboxed boolean
    pub prim_bool: TypeId,
}

fn class(name: &str, superclass: Option<TypeId>) -> TypeDef {
    let mut def = TypeDef::new(name, TypeKind::Class);
    def.superclass = superclass;
    def
}

/// Build a registry holding the standard core types
pub fn standard_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::empty();

    let object = registry.register(class("Object", None));
    let number = registry.register(class("Number", Some(object)));
    let int = registry.register(class("Int", Some(number)));
    let long = registry.register(class("Long", Some(number)));
    let double = registry.register(class("Double", Some(number)));
    let boolean = registry.register(class("Boolean", Some(object)));
    let str = registry.register(class("Str", Some(object)));

    let prim_int = registry.register(TypeDef::new("int", TypeKind::Primitive));
    let prim_long = registry.register(TypeDef::new("long", TypeKind::Primitive));
    let prim_double = registry.register(TypeDef::new("double", TypeKind::Primitive));
    let prim_bool = registry.register(TypeDef::new("boolean", TypeKind::Primitive));

    registry.pair_primitive(prim_int, int);
    registry.pair_primitive(prim_long, long);
    registry.pair_primitive(prim_double, double);
    registry.pair_primitive(prim_bool, boolean);

    registry.core = Some(CoreTypes {
        object,
        number,
        int,
        long,
        double,
        boolean,
        str,
        prim_int,
        prim_long,
        prim_double,
        prim_bool,
    });

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_shape() {
        let registry = standard_registry();
        let core = registry.core();

        let int = registry.get(core.int).unwrap();
        assert_eq!(int.superclass, Some(core.number));
        assert_eq!(int.unboxed, Some(core.prim_int));

        let number = registry.get(core.number).unwrap();
        assert_eq!(number.superclass, Some(core.object));

        let object = registry.get(core.object).unwrap();
        assert_eq!(object.superclass, None);

        let prim = registry.get(core.prim_int).unwrap();
        assert_eq!(prim.kind, TypeKind::Primitive);
        assert_eq!(prim.boxed, Some(core.int));
    }
}
