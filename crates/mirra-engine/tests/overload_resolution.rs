//! Integration tests for overload resolution and invocation
//!
//! Mirrors the contract of the declaration matcher at the operation level:
//! most-specific overload wins, unrelated ties are ambiguous, explicit
//! signatures bypass inference, and body failures keep their cause.

mod common;

use std::error::Error as _;

use mirra_engine::ResolveError;
use mirra_types::Value;

#[test]
fn test_most_specific_instance_overload_wins() {
    let fx = common::fixture();
    let target = fx.engine.construct(fx.overloads, vec![]).unwrap();

    let with_int = target.call("describe", vec![Value::Int(1)]).unwrap();
    assert_eq!(with_int.value(), &Value::str("int"));

    let with_long = target.call("describe", vec![Value::Long(1)]).unwrap();
    assert_eq!(with_long.value(), &Value::str("number"));

    let with_str = target.call("describe", vec![Value::str("hello")]).unwrap();
    assert_eq!(with_str.value(), &Value::str("object"));
}

#[test]
fn test_static_overloads_on_type_target() {
    let fx = common::fixture();
    let target = fx.engine.on_type("Overloads").unwrap();

    let with_long = target.call("tag", vec![Value::Long(1)]).unwrap();
    assert_eq!(with_long.value(), &Value::str("static number"));

    let with_str = target.call("tag", vec![Value::str("x")]).unwrap();
    assert_eq!(with_str.value(), &Value::str("static object"));
}

#[test]
fn test_null_argument_prefers_least_specific() {
    let fx = common::fixture();
    let target = fx.engine.construct(fx.overloads, vec![]).unwrap();

    // Object costs 1 for null, Number 2, Int 3.
    let chosen = target.call("describe", vec![Value::Null]).unwrap();
    assert_eq!(chosen.value(), &Value::str("object"));
}

#[test]
fn test_ambiguous_overload_is_an_error() {
    let fx = common::fixture();
    let target = fx.engine.construct(fx.overloads, vec![]).unwrap();

    // pair(Str, Object) and pair(Object, Str) both sit at distance 1 for
    // (Str, Str) arguments.
    let err = target
        .call("pair", vec![Value::str("a"), Value::str("b")])
        .unwrap_err();
    match err {
        ResolveError::AmbiguousOverload { candidates, .. } => {
            assert!(candidates.contains("pair"));
        }
        other => panic!("expected ambiguity, got {other}"),
    }
}

#[test]
fn test_explicit_signature_bypasses_inference() {
    let fx = common::fixture();
    let core = *fx.engine.registry().core();
    let target = fx.engine.construct(fx.overloads, vec![]).unwrap();

    let chosen = target
        .call_typed(
            "pair",
            &[core.str, core.object],
            vec![Value::str("a"), Value::str("b")],
        )
        .unwrap();
    assert_eq!(chosen.value(), &Value::str("str-object"));
}

#[test]
fn test_no_applicable_overload() {
    let fx = common::fixture();
    let target = fx.engine.construct(fx.overloads, vec![]).unwrap();

    let err = target.call("numeric", vec![Value::str("nan")]).unwrap_err();
    assert!(matches!(err, ResolveError::NoApplicableOverload { .. }));
}

#[test]
fn test_no_such_member() {
    let fx = common::fixture();
    let target = fx.engine.construct(fx.overloads, vec![]).unwrap();

    let err = target.call("missing", vec![]).unwrap_err();
    assert!(matches!(err, ResolveError::NoSuchMember { .. }));
}

#[test]
fn test_invocation_failure_preserves_cause() {
    let fx = common::fixture();
    let target = fx.engine.construct(fx.overloads, vec![]).unwrap();

    let err = target.call("explode", vec![]).unwrap_err();
    match &err {
        ResolveError::InvocationFailure { .. } => {
            let source = err.source().expect("cause preserved");
            assert_eq!(source.to_string(), "boom");
        }
        other => panic!("expected invocation failure, got {other}"),
    }
}

#[test]
fn test_instance_method_without_receiver() {
    let fx = common::fixture();
    let target = fx.engine.on_type("Overloads").unwrap();

    let err = target.call("describe", vec![Value::Int(1)]).unwrap_err();
    assert!(matches!(err, ResolveError::MissingReceiver { .. }));
}

#[test]
fn test_constructed_handle_chains_into_calls() {
    let fx = common::fixture();

    let sum = fx
        .engine
        .construct(fx.point, vec![Value::Int(3), Value::Int(4)])
        .unwrap()
        .call("sum", vec![])
        .unwrap();
    assert_eq!(sum.value(), &Value::Int(7));
}

#[test]
fn test_constructor_overload_mismatch() {
    let fx = common::fixture();

    let err = fx
        .engine
        .construct(fx.point, vec![Value::str("nope")])
        .unwrap_err();
    assert!(matches!(err, ResolveError::NoApplicableOverload { .. }));
}

#[test]
fn test_implicit_default_constructor() {
    let fx = common::fixture();

    let made = fx.engine.construct(fx.counter, vec![]).unwrap();
    assert_eq!(made.type_of(), fx.counter);

    let err = fx
        .engine
        .construct(fx.counter, vec![Value::Int(1)])
        .unwrap_err();
    assert!(matches!(err, ResolveError::NoSuchMember { .. }));
}
