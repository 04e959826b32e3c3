//! Resolution & Invocation Engine
//!
//! The operation surface over targets and handles: field read/write,
//! point-in-time field snapshots, method invocation with overload inference
//! or an explicit signature, and construction. Every resolution is a single
//! synchronous resolve-then-access step; every field access and invocation
//! runs inside a call-scoped access grant.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use mirra_types::{
    CallCtx, Instance, NativeError, TypeDef, TypeId, TypeKind, TypeRegistry, Value,
};

use crate::access::{AccessGrant, AccessKind, AccessPolicy, AccessRequest, AllowAll};
use crate::catalog::{Catalog, CatalogCache, MemberDescriptor, MemberKind, CTOR_NAME};
use crate::error::{ResolveError, Result};
use crate::handle::Handle;
use crate::matcher::{assignment_distance, NOT_ASSIGNABLE};
use crate::selector::{select_best, SelectionError};
use crate::view::CapabilityView;

/// The member resolution and invocation engine
///
/// Stateless per call; the only internal state is the shared catalog cache,
/// which is safe to use from concurrent callers.
pub struct Engine {
    registry: Arc<TypeRegistry>,
    catalogs: CatalogCache,
    policy: Arc<dyn AccessPolicy>,
}

impl Engine {
    /// Create an engine over a loaded registry with the allow-all policy
    pub fn new(registry: TypeRegistry) -> Arc<Self> {
        Self::with_policy(registry, Arc::new(AllowAll))
    }

    /// Create an engine with an explicit access policy
    pub fn with_policy(registry: TypeRegistry, policy: Arc<dyn AccessPolicy>) -> Arc<Self> {
        Arc::new(Self {
            registry: Arc::new(registry),
            catalogs: CatalogCache::new(),
            policy,
        })
    }

    /// The registry this engine resolves against
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Name of a type id, for diagnostics
    pub fn type_name(&self, ty: TypeId) -> String {
        self.registry.name_of(ty).to_string()
    }

    /// Wrap a live value; its runtime type becomes the resolution start
    pub fn on(self: &Arc<Self>, value: Value) -> Result<Handle> {
        let static_type =
            value
                .runtime_type(&self.registry)
                .ok_or_else(|| ResolveError::TypeMismatch {
                    expected: "non-null target".to_string(),
                    got: "null".to_string(),
                })?;
        Ok(Handle::new(self.clone(), value, static_type))
    }

    /// Wrap a type-only target, looked up by name
    pub fn on_type(self: &Arc<Self>, name: &str) -> Result<Handle> {
        let ty = self
            .registry
            .lookup(name)
            .ok_or_else(|| ResolveError::UnknownType {
                name: name.to_string(),
            })?;
        Ok(Handle::new(self.clone(), Value::Null, ty))
    }

    /// Wrap a type-only target by id
    pub fn on_type_id(self: &Arc<Self>, ty: TypeId) -> Result<Handle> {
        self.def(ty)?;
        Ok(Handle::new(self.clone(), Value::Null, ty))
    }

    /// Resolve and read the field `name`, most-derived declaration first
    pub fn resolve_field(self: &Arc<Self>, target: &Handle, name: &str) -> Result<Handle> {
        let catalog = self.catalog_for(target.type_of());
        let (field, ty) = self.find_field(&catalog, target.type_of(), name)?;
        let value = self.with_access(&field, AccessKind::Read, || {
            self.read_field(target, &field, ty)
        })?;
        let static_type = value.runtime_type(&self.registry).unwrap_or(ty);
        Ok(Handle::new(self.clone(), value, static_type))
    }

    /// Resolve the field `name` and write `value`, returning the target for
    /// chaining. The value must be assignable to the declared field type;
    /// null against a primitive-typed field is a type mismatch.
    pub fn set_field(
        self: &Arc<Self>,
        target: &Handle,
        name: &str,
        value: Value,
    ) -> Result<Handle> {
        let catalog = self.catalog_for(target.type_of());
        let (field, ty) = self.find_field(&catalog, target.type_of(), name)?;

        let arg = value.runtime_type(&self.registry);
        if assignment_distance(&self.registry, ty, arg) == NOT_ASSIGNABLE {
            return Err(ResolveError::TypeMismatch {
                expected: self.type_name(ty),
                got: arg
                    .map(|t| self.type_name(t))
                    .unwrap_or_else(|| "null".to_string()),
            });
        }

        self.with_access(&field, AccessKind::Write, || {
            if field.is_static {
                self.def(field.declaring)?.set_static(&field.name, value);
                Ok(())
            } else {
                let instance = self.receiver_instance(target, &field.name)?;
                instance.set(field.declaring, &field.name, value);
                Ok(())
            }
        })?;
        Ok(target.clone())
    }

    /// Point-in-time snapshot of every resolvable field, shadowing honored:
    /// one handle per name, read from the most-derived declaration. Static
    /// fields are always included; instance fields only when the target
    /// carries an instance. Fields the policy refuses to grant are left out
    /// rather than failing the whole snapshot.
    pub fn resolve_all_fields(
        self: &Arc<Self>,
        target: &Handle,
    ) -> Result<FxHashMap<String, Handle>> {
        let catalog = self.catalog_for(target.type_of());
        let mut snapshot = FxHashMap::default();
        for name in catalog.names() {
            let Ok((field, ty)) = self.find_field(&catalog, target.type_of(), name) else {
                continue;
            };
            if !field.is_static && target.value().as_instance().is_none() {
                continue;
            }
            let value = match self.with_access(&field, AccessKind::Read, || {
                self.read_field(target, &field, ty)
            }) {
                Ok(value) => value,
                Err(ResolveError::AccessDenied { .. }) => continue,
                Err(other) => return Err(other),
            };
            let static_type = value.runtime_type(&self.registry).unwrap_or(ty);
            snapshot.insert(
                name.to_string(),
                Handle::new(self.clone(), value, static_type),
            );
        }
        Ok(snapshot)
    }

    /// Invoke the best-matching overload of `name` for the given arguments
    pub fn invoke(
        self: &Arc<Self>,
        target: &Handle,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Handle> {
        let catalog = self.catalog_for(target.type_of());
        let methods: Vec<Arc<MemberDescriptor>> = catalog
            .bucket(name)
            .iter()
            .filter(|m| matches!(m.kind, MemberKind::Method { .. }))
            .cloned()
            .collect();
        if methods.is_empty() {
            return Err(ResolveError::NoSuchMember {
                type_name: self.type_name(target.type_of()),
                name: name.to_string(),
            });
        }

        let arg_types = self.arg_types(&args);
        let chosen = select_best(&self.registry, &methods, &arg_types)
            .map_err(|e| self.selection_error(e, target.type_of(), name, &arg_types))?;
        self.invoke_descriptor(target, &chosen, args)
    }

    /// Invoke the method whose declared parameter list is exactly
    /// `param_types`, bypassing overload inference
    pub fn invoke_typed(
        self: &Arc<Self>,
        target: &Handle,
        name: &str,
        param_types: &[TypeId],
        args: Vec<Value>,
    ) -> Result<Handle> {
        let catalog = self.catalog_for(target.type_of());
        let chosen = catalog
            .bucket(name)
            .iter()
            .find(|m| {
                matches!(m.kind, MemberKind::Method { .. }) && m.params() == Some(param_types)
            })
            .cloned()
            .ok_or_else(|| ResolveError::NoSuchMember {
                type_name: self.type_name(target.type_of()),
                name: name.to_string(),
            })?;
        self.invoke_descriptor(target, &chosen, args)
    }

    /// Construct an instance of `ty` with the best-matching constructor.
    /// A class declaring no constructor accepts a zero-argument call.
    pub fn construct(self: &Arc<Self>, ty: TypeId, args: Vec<Value>) -> Result<Handle> {
        let def = self.def(ty)?;
        if def.kind != TypeKind::Class {
            return Err(ResolveError::TypeMismatch {
                expected: "class".to_string(),
                got: def.name.clone(),
            });
        }

        let catalog = self.catalog_for(ty);
        let ctors = catalog.bucket(CTOR_NAME);
        if ctors.is_empty() {
            if args.is_empty() {
                let value = Value::Instance(Instance::new(ty));
                return Ok(Handle::new(self.clone(), value, ty));
            }
            return Err(ResolveError::NoSuchMember {
                type_name: def.name.clone(),
                name: CTOR_NAME.to_string(),
            });
        }

        let arg_types = self.arg_types(&args);
        let chosen = select_best(&self.registry, ctors, &arg_types)
            .map_err(|e| self.selection_error(e, ty, CTOR_NAME, &arg_types))?;
        let body = match &chosen.kind {
            MemberKind::Constructor { body, .. } => body.clone(),
            _ => {
                return Err(ResolveError::InvocationFailure {
                    name: CTOR_NAME.to_string(),
                    source: NativeError::ArgumentError("selected member is not a constructor".to_string()),
                })
            }
        };

        let value = Value::Instance(Instance::new(ty));
        self.with_access(&chosen, AccessKind::Invoke, || {
            let ctx = CallCtx {
                registry: &self.registry,
                receiver: Some(&value),
                args: &args,
            };
            body(&ctx)
                .map(|_| ())
                .map_err(|source| ResolveError::InvocationFailure {
                    name: CTOR_NAME.to_string(),
                    source,
                })
        })?;
        Ok(Handle::new(self.clone(), value, ty))
    }

    /// Construct by type name
    pub fn construct_named(self: &Arc<Self>, name: &str, args: Vec<Value>) -> Result<Handle> {
        let ty = self
            .registry
            .lookup(name)
            .ok_or_else(|| ResolveError::UnknownType {
                name: name.to_string(),
            })?;
        self.construct(ty, args)
    }

    /// Materialize a capability view of `target` through an interface: each
    /// call on the view redispatches through [`Engine::invoke`]
    pub fn materialize_view(
        self: &Arc<Self>,
        target: &Handle,
        interface: TypeId,
    ) -> Result<CapabilityView> {
        let def = self.def(interface)?;
        if def.kind != TypeKind::Interface {
            return Err(ResolveError::TypeMismatch {
                expected: "interface".to_string(),
                got: def.name.clone(),
            });
        }
        Ok(CapabilityView::new(self.clone(), target.clone(), interface))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn catalog_for(&self, ty: TypeId) -> Arc<Catalog> {
        self.catalogs.get_or_build(&self.registry, ty)
    }

    fn def(&self, ty: TypeId) -> Result<&TypeDef> {
        self.registry.get(ty).ok_or_else(|| ResolveError::UnknownType {
            name: format!("#{}", ty.index()),
        })
    }

    fn arg_types(&self, args: &[Value]) -> Vec<Option<TypeId>> {
        args.iter().map(|v| v.runtime_type(&self.registry)).collect()
    }

    fn find_field(
        &self,
        catalog: &Catalog,
        start: TypeId,
        name: &str,
    ) -> Result<(Arc<MemberDescriptor>, TypeId)> {
        catalog
            .bucket(name)
            .iter()
            .find_map(|m| match m.kind {
                MemberKind::Field { ty } => Some((m.clone(), ty)),
                _ => None,
            })
            .ok_or_else(|| ResolveError::NoSuchMember {
                type_name: self.type_name(start),
                name: name.to_string(),
            })
    }

    fn read_field(
        &self,
        target: &Handle,
        field: &MemberDescriptor,
        ty: TypeId,
    ) -> Result<Value> {
        if field.is_static {
            let def = self.def(field.declaring)?;
            Ok(def
                .get_static(&field.name)
                .unwrap_or_else(|| self.registry.default_value(ty)))
        } else {
            let instance = self.receiver_instance(target, &field.name)?;
            Ok(instance
                .get(field.declaring, &field.name)
                .unwrap_or_else(|| self.registry.default_value(ty)))
        }
    }

    fn receiver_instance<'t>(&self, target: &'t Handle, member: &str) -> Result<&'t Instance> {
        match target.value() {
            Value::Null => Err(ResolveError::MissingReceiver {
                name: member.to_string(),
            }),
            other => other
                .as_instance()
                .ok_or_else(|| ResolveError::TypeMismatch {
                    expected: "instance".to_string(),
                    got: other.to_string(),
                }),
        }
    }

    fn invoke_descriptor(
        self: &Arc<Self>,
        target: &Handle,
        member: &Arc<MemberDescriptor>,
        args: Vec<Value>,
    ) -> Result<Handle> {
        let (return_type, body) = match &member.kind {
            MemberKind::Method {
                return_type, body, ..
            } => (*return_type, body.clone()),
            _ => {
                return Err(ResolveError::InvocationFailure {
                    name: member.name.clone(),
                    source: NativeError::ArgumentError("selected member is not a method".to_string()),
                })
            }
        };
        let body = body.ok_or_else(|| ResolveError::InvocationFailure {
            name: member.name.clone(),
            source: NativeError::Raised("method declaration has no body".to_string()),
        })?;

        let receiver = if member.is_static {
            None
        } else {
            if target.value().is_null() {
                return Err(ResolveError::MissingReceiver {
                    name: member.name.clone(),
                });
            }
            Some(target.value().clone())
        };

        let value = self.with_access(member, AccessKind::Invoke, || {
            let ctx = CallCtx {
                registry: &self.registry,
                receiver: receiver.as_ref(),
                args: &args,
            };
            body(&ctx).map_err(|source| ResolveError::InvocationFailure {
                name: member.name.clone(),
                source,
            })
        })?;

        let static_type = value
            .runtime_type(&self.registry)
            .or(return_type)
            .unwrap_or(self.registry.core().object);
        Ok(Handle::new(self.clone(), value, static_type))
    }

    fn selection_error(
        &self,
        error: SelectionError,
        ty: TypeId,
        name: &str,
        arg_types: &[Option<TypeId>],
    ) -> ResolveError {
        match error {
            SelectionError::NoApplicable => ResolveError::NoApplicableOverload {
                type_name: self.type_name(ty),
                name: name.to_string(),
                args: self.render_args(arg_types),
            },
            SelectionError::Ambiguous(signatures) => ResolveError::AmbiguousOverload {
                type_name: self.type_name(ty),
                name: name.to_string(),
                candidates: signatures.join(", "),
            },
        }
    }

    fn render_args(&self, arg_types: &[Option<TypeId>]) -> String {
        arg_types
            .iter()
            .map(|t| match t {
                Some(ty) => self.registry.name_of(*ty).to_string(),
                None => "null".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Run one access under a call-scoped grant. The grant is released on
    /// every exit path; no state is left on the shared descriptor.
    fn with_access<T>(
        &self,
        member: &MemberDescriptor,
        kind: AccessKind,
        body: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let request = AccessRequest { member, kind };
        if !self.policy.grant(&request) {
            return Err(ResolveError::AccessDenied {
                type_name: self.type_name(member.declaring),
                name: member.name.clone(),
            });
        }
        let _grant = AccessGrant::new(self.policy.as_ref(), member, kind);
        body()
    }
}
