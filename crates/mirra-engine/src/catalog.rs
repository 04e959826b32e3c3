//! Member Catalog
//!
//! A catalog is built for one starting type by walking its superclass chain
//! most-derived first and collecting every declared member, public or not,
//! into per-name buckets. Same-named members at different declaring types
//! are distinct descriptors; nothing is deduplicated across levels, so a
//! shadowed base member stays reachable through a catalog built for its
//! declaring type.
//!
//! Catalogs are immutable once built and shared through [`CatalogCache`].

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxHashMap;

use mirra_types::{NativeBody, TypeId, TypeRegistry, Visibility};

/// Bucket name under which constructors are cataloged
pub const CTOR_NAME: &str = "<init>";

/// Kind-specific payload of a member descriptor
#[derive(Clone)]
pub enum MemberKind {
    /// A field with its declared value type
    Field {
        /// Declared value type
        ty: TypeId,
    },
    /// A method with its declared signature and native body
    Method {
        /// Ordered declared parameter types
        params: Vec<TypeId>,
        /// Declared return type (None for void)
        return_type: Option<TypeId>,
        /// Whether the trailing parameter is variable-arity
        is_varargs: bool,
        /// Native body (None for an interface declaration)
        body: Option<NativeBody>,
    },
    /// A constructor with its declared signature and native body
    Constructor {
        /// Ordered declared parameter types
        params: Vec<TypeId>,
        /// Whether the trailing parameter is variable-arity
        is_varargs: bool,
        /// Native body
        body: NativeBody,
    },
}

impl fmt::Debug for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Field { ty } => f.debug_struct("Field").field("ty", ty).finish(),
            MemberKind::Method {
                params,
                return_type,
                is_varargs,
                ..
            } => f
                .debug_struct("Method")
                .field("params", params)
                .field("return_type", return_type)
                .field("is_varargs", is_varargs)
                .finish(),
            MemberKind::Constructor {
                params, is_varargs, ..
            } => f
                .debug_struct("Constructor")
                .field("params", params)
                .field("is_varargs", is_varargs)
                .finish(),
        }
    }
}

/// One declared member, located at one hierarchy level
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    /// Member name (constructors use [`CTOR_NAME`])
    pub name: String,
    /// Type whose body declares this member
    pub declaring: TypeId,
    /// Declared visibility
    pub visibility: Visibility,
    /// Whether the member lives on the type rather than on instances
    pub is_static: bool,
    /// Kind-specific payload
    pub kind: MemberKind,
}

impl MemberDescriptor {
    /// Declared parameter types, for invocable members
    pub fn params(&self) -> Option<&[TypeId]> {
        match &self.kind {
            MemberKind::Field { .. } => None,
            MemberKind::Method { params, .. } => Some(params),
            MemberKind::Constructor { params, .. } => Some(params),
        }
    }

    /// Variable-arity flag, false for fields
    pub fn is_varargs(&self) -> bool {
        match &self.kind {
            MemberKind::Field { .. } => false,
            MemberKind::Method { is_varargs, .. } => *is_varargs,
            MemberKind::Constructor { is_varargs, .. } => *is_varargs,
        }
    }

    /// Whether this descriptor is a field
    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field { .. })
    }

    /// Render `name(ParamType, ...)` for diagnostics
    pub fn signature(&self, registry: &TypeRegistry) -> String {
        match self.params() {
            None => format!("{}.{}", registry.name_of(self.declaring), self.name),
            Some(params) => {
                let rendered: Vec<&str> =
                    params.iter().map(|&p| registry.name_of(p)).collect();
                format!(
                    "{}.{}({})",
                    registry.name_of(self.declaring),
                    self.name,
                    rendered.join(", ")
                )
            }
        }
    }
}

/// Per-name member buckets for one starting type
#[derive(Debug, Default)]
pub struct Catalog {
    buckets: FxHashMap<String, Vec<Arc<MemberDescriptor>>>,
}

impl Catalog {
    /// Build the catalog for `start`: every ancestor level, most-derived
    /// first, non-public members included. Constructors come from `start`
    /// itself only; they are not inherited.
    pub fn build(registry: &TypeRegistry, start: TypeId) -> Self {
        let mut catalog = Catalog::default();

        for level in registry.hierarchy(start) {
            let Some(def) = registry.get(level) else {
                continue;
            };
            for field in &def.fields {
                catalog.push(Arc::new(MemberDescriptor {
                    name: field.name.clone(),
                    declaring: level,
                    visibility: field.visibility,
                    is_static: field.is_static,
                    kind: MemberKind::Field { ty: field.ty },
                }));
            }
            for method in &def.methods {
                catalog.push(Arc::new(MemberDescriptor {
                    name: method.name.clone(),
                    declaring: level,
                    visibility: method.visibility,
                    is_static: method.is_static,
                    kind: MemberKind::Method {
                        params: method.params.clone(),
                        return_type: method.return_type,
                        is_varargs: method.is_varargs,
                        body: method.body.clone(),
                    },
                }));
            }
            if level == start {
                for ctor in &def.constructors {
                    catalog.push(Arc::new(MemberDescriptor {
                        name: CTOR_NAME.to_string(),
                        declaring: level,
                        visibility: ctor.visibility,
                        is_static: false,
                        kind: MemberKind::Constructor {
                            params: ctor.params.clone(),
                            is_varargs: ctor.is_varargs,
                            body: ctor.body.clone(),
                        },
                    }));
                }
            }
        }

        catalog
    }

    fn push(&mut self, member: Arc<MemberDescriptor>) {
        self.buckets
            .entry(member.name.clone())
            .or_default()
            .push(member);
    }

    /// Members declared under `name`, most-derived declaring type first
    pub fn bucket(&self, name: &str) -> &[Arc<MemberDescriptor>] {
        self.buckets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All cataloged member names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }
}

/// Concurrent cache of built catalogs, shared across callers
#[derive(Debug, Default)]
pub struct CatalogCache {
    catalogs: DashMap<TypeId, Arc<Catalog>>,
}

impl CatalogCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the catalog for `start`, building it on first use
    pub fn get_or_build(&self, registry: &TypeRegistry, start: TypeId) -> Arc<Catalog> {
        if let Some(found) = self.catalogs.get(&start) {
            return found.clone();
        }
        self.catalogs
            .entry(start)
            .or_insert_with(|| Arc::new(Catalog::build(registry, start)))
            .clone()
    }
}
