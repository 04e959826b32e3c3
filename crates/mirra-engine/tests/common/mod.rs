//! Shared fixture registry for the engine integration tests
//!
//! Builds a small class library:
//! - `Base` / `Sub`: same-named private fields and same-signature methods
//!   at two hierarchy levels, for shadowing tests
//! - `Point`: primitive-typed fields, a two-argument constructor, and a
//!   nullable `Str` field, for field round-trip tests
//! - `Overloads`: overload sets over `Object`/`Number`/`Int` plus a
//!   deliberately ambiguous pair
//! - `Counter`: a static field
//! - `Labeled`: an interface for capability views

#![allow(dead_code)]

use std::sync::Arc;

use mirra_engine::{AccessPolicy, Engine};
use mirra_types::{
    standard_registry, ClassBuilder, ConstructorDef, FieldDef, MethodDef, NativeError, TypeId,
    Value, Visibility,
};

pub struct Fixture {
    pub engine: Arc<Engine>,
    pub base: TypeId,
    pub sub: TypeId,
    pub point: TypeId,
    pub overloads: TypeId,
    pub counter: TypeId,
    pub labeled: TypeId,
}

pub fn fixture() -> Fixture {
    build(None)
}

pub fn fixture_with_policy(policy: Arc<dyn AccessPolicy>) -> Fixture {
    build(Some(policy))
}

fn build(policy: Option<Arc<dyn AccessPolicy>>) -> Fixture {
    let mut registry = standard_registry();
    let core = *registry.core();

    let base = ClassBuilder::class("Base")
        .field(FieldDef::new("secret", core.str, Visibility::Private))
        .field(FieldDef::new("label", core.str, Visibility::Public))
        .method(MethodDef::new(
            "greeting",
            vec![core.prim_int],
            Some(core.str),
            Visibility::Private,
            Arc::new(|_| Ok(Value::str("base"))),
        ))
        .register(&mut registry);

    let sub = ClassBuilder::class("Sub")
        .extends(base)
        .field(FieldDef::new("secret", core.str, Visibility::Private))
        .method(MethodDef::new(
            "greeting",
            vec![core.prim_int],
            Some(core.str),
            Visibility::Private,
            Arc::new(|_| Ok(Value::str("sub"))),
        ))
        .register(&mut registry);

    let point = ClassBuilder::class("Point")
        .field(FieldDef::new("x", core.prim_int, Visibility::Private))
        .field(FieldDef::new("y", core.prim_int, Visibility::Private))
        .field(FieldDef::new("name", core.str, Visibility::Public))
        .constructor(ConstructorDef::new(
            vec![core.prim_int, core.prim_int],
            Visibility::Public,
            Arc::new(|ctx| {
                let this = ctx.this_instance()?;
                this.set(this.class(), "x", ctx.arg(0)?.clone());
                this.set(this.class(), "y", ctx.arg(1)?.clone());
                Ok(Value::Null)
            }),
        ))
        .method(MethodDef::new(
            "sum",
            vec![],
            Some(core.int),
            Visibility::Public,
            Arc::new(|ctx| {
                let this = ctx.this_instance()?;
                let read = |name: &str| -> Result<i32, NativeError> {
                    this.get(this.class(), name)
                        .unwrap_or(Value::Int(0))
                        .as_int()
                        .ok_or_else(|| NativeError::ArgumentError(format!("{name} is not an int")))
                };
                Ok(Value::Int(read("x")? + read("y")?))
            }),
        ))
        .register(&mut registry);

    let overloads = ClassBuilder::class("Overloads")
        .method(MethodDef::new(
            "describe",
            vec![core.object],
            Some(core.str),
            Visibility::Private,
            Arc::new(|_| Ok(Value::str("object"))),
        ))
        .method(MethodDef::new(
            "describe",
            vec![core.number],
            Some(core.str),
            Visibility::Private,
            Arc::new(|_| Ok(Value::str("number"))),
        ))
        .method(MethodDef::new(
            "describe",
            vec![core.int],
            Some(core.str),
            Visibility::Private,
            Arc::new(|_| Ok(Value::str("int"))),
        ))
        .method(
            MethodDef::new(
                "tag",
                vec![core.object],
                Some(core.str),
                Visibility::Public,
                Arc::new(|_| Ok(Value::str("static object"))),
            )
            .as_static(),
        )
        .method(
            MethodDef::new(
                "tag",
                vec![core.number],
                Some(core.str),
                Visibility::Public,
                Arc::new(|_| Ok(Value::str("static number"))),
            )
            .as_static(),
        )
        .method(MethodDef::new(
            "pair",
            vec![core.str, core.object],
            Some(core.str),
            Visibility::Public,
            Arc::new(|_| Ok(Value::str("str-object"))),
        ))
        .method(MethodDef::new(
            "pair",
            vec![core.object, core.str],
            Some(core.str),
            Visibility::Public,
            Arc::new(|_| Ok(Value::str("object-str"))),
        ))
        .method(MethodDef::new(
            "numeric",
            vec![core.number],
            Some(core.str),
            Visibility::Public,
            Arc::new(|_| Ok(Value::str("numeric"))),
        ))
        .method(MethodDef::new(
            "explode",
            vec![],
            None,
            Visibility::Public,
            Arc::new(|_| Err(NativeError::Raised("boom".to_string()))),
        ))
        .register(&mut registry);

    let counter = ClassBuilder::class("Counter")
        .field(FieldDef::new("count", core.prim_int, Visibility::Public).as_static())
        .register(&mut registry);

    let labeled = ClassBuilder::interface("Labeled")
        .method(MethodDef::declaration(
            "greeting",
            vec![core.prim_int],
            Some(core.str),
        ))
        .method(MethodDef::declaration("getLabel", vec![], Some(core.str)))
        .method(MethodDef::declaration("setLabel", vec![core.str], None))
        .register(&mut registry);

    let engine = match policy {
        Some(policy) => Engine::with_policy(registry, policy),
        None => Engine::new(registry),
    };

    Fixture {
        engine,
        base,
        sub,
        point,
        overloads,
        counter,
        labeled,
    }
}
