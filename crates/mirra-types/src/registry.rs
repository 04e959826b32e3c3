//! Type Registry
//!
//! Holds every loaded type descriptor and answers the structural queries the
//! engine needs: name lookup, subtype tests, hierarchy walks, primitive/boxed
//! pairing, and per-type default values.
//!
//! A registry is effectively immutable once the types it serves are loaded;
//! only static field storage (behind a lock per type) mutates afterwards, so
//! a registry can be shared across concurrent callers without extra locking.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::bootstrap::CoreTypes;
use crate::members::{ConstructorDef, FieldDef, MethodDef};
use crate::value::Value;

/// Identifier of a loaded type, issued by the registry that loaded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Positional index of this type within its registry
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of a loaded type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Class with an optional superclass and field/method/constructor members
    Class,
    /// Interface: method declarations only, extendable by other interfaces
    Interface,
    /// Unboxed primitive, paired with a boxed class
    Primitive,
}

/// A loaded type descriptor
#[derive(Debug)]
pub struct TypeDef {
    /// Type name, unique within the registry
    pub name: String,
    /// Kind of type
    pub kind: TypeKind,
    /// Superclass edge (None for the root class, interfaces, and primitives)
    pub superclass: Option<TypeId>,
    /// Implemented interfaces (for classes) or extended interfaces
    pub interfaces: Vec<TypeId>,
    /// Boxed partner (set on primitives)
    pub boxed: Option<TypeId>,
    /// Primitive partner (set on boxed classes)
    pub unboxed: Option<TypeId>,
    /// Fields declared directly on this type
    pub fields: Vec<FieldDef>,
    /// Methods declared directly on this type
    pub methods: Vec<MethodDef>,
    /// Constructors declared directly on this type
    pub constructors: Vec<ConstructorDef>,
    statics: RwLock<FxHashMap<String, Value>>,
}

impl TypeDef {
    /// Create a bare type descriptor with no members
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            superclass: None,
            interfaces: Vec::new(),
            boxed: None,
            unboxed: None,
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            statics: RwLock::new(FxHashMap::default()),
        }
    }

    /// Read a static field slot, if it has been written
    pub fn get_static(&self, name: &str) -> Option<Value> {
        self.statics.read().get(name).cloned()
    }

    /// Write a static field slot
    pub fn set_static(&self, name: &str, value: Value) {
        self.statics.write().insert(name.to_string(), value);
    }
}

/// Registry of loaded types
#[derive(Debug)]
pub struct TypeRegistry {
    types: Vec<TypeDef>,
    by_name: FxHashMap<String, TypeId>,
    pub(crate) core: Option<CoreTypes>,
}

impl TypeRegistry {
    pub(crate) fn empty() -> Self {
        Self {
            types: Vec::new(),
            by_name: FxHashMap::default(),
            core: None,
        }
    }

    /// Register a type descriptor and issue its id
    pub fn register(&mut self, def: TypeDef) -> TypeId {
        let id = TypeId::from_index(self.types.len());
        self.by_name.insert(def.name.clone(), id);
        self.types.push(def);
        id
    }

    /// The bootstrap core types of this registry
    pub fn core(&self) -> &CoreTypes {
        self.core
            .as_ref()
            .expect("registry constructed without bootstrap core types")
    }

    /// Get a type descriptor by id
    pub fn get(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.index())
    }

    /// Lookup a type id by name
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Name of a type, or a placeholder for a foreign id
    pub fn name_of(&self, id: TypeId) -> &str {
        self.get(id).map(|d| d.name.as_str()).unwrap_or("<unknown>")
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry holds no types
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Superclass chain starting at `id`, most-derived first
    pub fn hierarchy(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(tid) = current {
            chain.push(tid);
            current = self.get(tid).and_then(|d| d.superclass);
        }
        chain
    }

    /// Number of superclass hops from `id` up to its root ancestor
    pub fn chain_depth(&self, id: TypeId) -> u32 {
        let mut depth = 0;
        let mut current = self.get(id).and_then(|d| d.superclass);
        while let Some(tid) = current {
            depth += 1;
            current = self.get(tid).and_then(|d| d.superclass);
        }
        depth
    }

    /// Whether `sub` is `sup` or reachable from it via superclass or
    /// interface edges (any number of hops)
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return true;
        }
        let Some(def) = self.get(sub) else {
            return false;
        };
        if let Some(parent) = def.superclass {
            if self.is_subtype(parent, sup) {
                return true;
            }
        }
        def.interfaces.iter().any(|&i| self.is_subtype(i, sup))
    }

    /// Normalize a primitive to its boxed partner; other types pass through
    pub fn boxed(&self, id: TypeId) -> TypeId {
        self.get(id).and_then(|d| d.boxed).unwrap_or(id)
    }

    /// Whether a type is an unboxed primitive
    pub fn is_primitive(&self, id: TypeId) -> bool {
        self.get(id).map(|d| d.kind == TypeKind::Primitive).unwrap_or(false)
    }

    /// Default value of an uninitialized slot of the given declared type:
    /// the zero value for primitives, null for everything else
    pub fn default_value(&self, id: TypeId) -> Value {
        let core = self.core();
        if id == core.prim_int {
            Value::Int(0)
        } else if id == core.prim_long {
            Value::Long(0)
        } else if id == core.prim_double {
            Value::Double(0.0)
        } else if id == core.prim_bool {
            Value::Bool(false)
        } else {
            Value::Null
        }
    }

    pub(crate) fn pair_primitive(&mut self, primitive: TypeId, boxed: TypeId) {
        if let Some(def) = self.types.get_mut(primitive.index()) {
            def.boxed = Some(boxed);
        }
        if let Some(def) = self.types.get_mut(boxed.index()) {
            def.unboxed = Some(primitive);
        }
    }
}
