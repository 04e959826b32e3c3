//! Assignability & Distance Evaluator
//!
//! For one declared parameter list and one runtime argument-type list,
//! decides assignability and computes a specificity score. Lower is more
//! specific; an exact type match costs 0 and each superclass or interface
//! hop along the shortest path costs 1. Primitives and their boxes are
//! normalized to the boxed form before comparison.
//!
//! A null argument is never walked: against a non-primitive parameter it
//! costs the parameter type's superclass-chain depth plus one (so `Object`
//! accepts null at 1, `Int` at 3), and against a primitive parameter it is
//! not assignable at all.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use mirra_types::{TypeId, TypeRegistry};

/// Distance marker for a non-assignable pairing
pub const NOT_ASSIGNABLE: u32 = u32::MAX;

/// Outcome of matching one argument list against one declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    distance: u32,
}

impl MatchResult {
    /// Whether every parameter accepted its argument
    pub fn assignable(&self) -> bool {
        self.distance != NOT_ASSIGNABLE
    }

    /// Summed per-parameter distance, or [`NOT_ASSIGNABLE`]
    pub fn distance(&self) -> u32 {
        self.distance
    }
}

/// Matcher for one declared parameter-type list
#[derive(Debug)]
pub struct DeclarationMatcher<'a> {
    registry: &'a TypeRegistry,
    params: Vec<TypeId>,
    is_varargs: bool,
}

impl<'a> DeclarationMatcher<'a> {
    /// Create a matcher for a fixed-arity declaration
    pub fn new(registry: &'a TypeRegistry, params: &[TypeId]) -> Self {
        Self {
            registry,
            params: params.to_vec(),
            is_varargs: false,
        }
    }

    /// Treat the trailing parameter as variable-arity
    pub fn varargs(mut self) -> Self {
        self.is_varargs = true;
        self
    }

    /// Match an argument-type list (`None` marks an explicit null argument)
    pub fn pass(&self, args: &[Option<TypeId>]) -> MatchResult {
        if self.is_varargs {
            return self.pass_varargs(args);
        }
        if args.len() != self.params.len() {
            return MatchResult {
                distance: NOT_ASSIGNABLE,
            };
        }
        let mut total: u32 = 0;
        for (&param, &arg) in self.params.iter().zip(args) {
            let d = assignment_distance(self.registry, param, arg);
            if d == NOT_ASSIGNABLE {
                return MatchResult {
                    distance: NOT_ASSIGNABLE,
                };
            }
            total += d;
        }
        MatchResult { distance: total }
    }

    fn pass_varargs(&self, args: &[Option<TypeId>]) -> MatchResult {
        let Some((&element, fixed)) = self.params.split_last() else {
            return MatchResult {
                distance: NOT_ASSIGNABLE,
            };
        };
        if args.len() < fixed.len() {
            return MatchResult {
                distance: NOT_ASSIGNABLE,
            };
        }
        let mut total: u32 = 0;
        for (&param, &arg) in fixed.iter().zip(args) {
            let d = assignment_distance(self.registry, param, arg);
            if d == NOT_ASSIGNABLE {
                return MatchResult {
                    distance: NOT_ASSIGNABLE,
                };
            }
            total += d;
        }
        for &arg in &args[fixed.len()..] {
            let d = assignment_distance(self.registry, element, arg);
            if d == NOT_ASSIGNABLE {
                return MatchResult {
                    distance: NOT_ASSIGNABLE,
                };
            }
            total += d;
        }
        MatchResult { distance: total }
    }
}

/// Distance for one declared parameter type against one argument type
/// (`None` marks null). Returns [`NOT_ASSIGNABLE`] when the argument cannot
/// be used where the parameter type is expected.
pub fn assignment_distance(
    registry: &TypeRegistry,
    param: TypeId,
    arg: Option<TypeId>,
) -> u32 {
    let Some(arg) = arg else {
        if registry.is_primitive(param) {
            return NOT_ASSIGNABLE;
        }
        return registry.chain_depth(param) + 1;
    };

    let param = registry.boxed(param);
    let arg = registry.boxed(arg);
    hop_count(registry, arg, param).unwrap_or(NOT_ASSIGNABLE)
}

/// Shortest hop count from `from` up to `to` along superclass and interface
/// edges, breadth-first
fn hop_count(registry: &TypeRegistry, from: TypeId, to: TypeId) -> Option<u32> {
    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();
    queue.push_back((from, 0u32));
    visited.insert(from);

    while let Some((current, hops)) = queue.pop_front() {
        if current == to {
            return Some(hops);
        }
        let Some(def) = registry.get(current) else {
            continue;
        };
        if let Some(parent) = def.superclass {
            if visited.insert(parent) {
                queue.push_back((parent, hops + 1));
            }
        }
        for &interface in &def.interfaces {
            if visited.insert(interface) {
                queue.push_back((interface, hops + 1));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirra_types::{standard_registry, ClassBuilder, CoreTypes};

    fn fixture() -> (TypeRegistry, CoreTypes) {
        let registry = standard_registry();
        let core = *registry.core();
        (registry, core)
    }

    #[test]
    fn test_assignable() {
        let (registry, core) = fixture();

        let pass = |param, arg| DeclarationMatcher::new(&registry, &[param]).pass(&[arg]);

        assert!(pass(core.object, None).assignable());
        assert!(pass(core.int, Some(core.int)).assignable());
        assert!(pass(core.number, Some(core.int)).assignable());
        assert!(pass(core.object, Some(core.int)).assignable());

        assert!(!pass(core.int, Some(core.str)).assignable());
        assert!(!pass(core.str, Some(core.object)).assignable());
    }

    #[test]
    fn test_distance_calibration() {
        let (registry, core) = fixture();

        let dist = |params: &[TypeId], args: &[Option<TypeId>]| {
            DeclarationMatcher::new(&registry, params).pass(args).distance()
        };

        assert_eq!(dist(&[core.int], &[Some(core.int)]), 0);
        assert_eq!(dist(&[core.number], &[Some(core.int)]), 1);
        assert_eq!(dist(&[core.object], &[Some(core.int)]), 2);
        assert_eq!(dist(&[core.int], &[None]), 3);
        assert_eq!(dist(&[core.object], &[None]), 1);
        assert_eq!(dist(&[core.object, core.object], &[None, None]), 2);

        assert_eq!(dist(&[core.int], &[Some(core.str)]), NOT_ASSIGNABLE);
        assert_eq!(dist(&[core.str], &[Some(core.object)]), NOT_ASSIGNABLE);
    }

    #[test]
    fn test_primitive_boxing_pairs() {
        let (registry, core) = fixture();

        assert_eq!(assignment_distance(&registry, core.prim_int, Some(core.int)), 0);
        assert_eq!(assignment_distance(&registry, core.int, Some(core.prim_int)), 0);
        assert_eq!(assignment_distance(&registry, core.number, Some(core.prim_int)), 1);
        assert_eq!(assignment_distance(&registry, core.prim_int, None), NOT_ASSIGNABLE);
    }

    #[test]
    fn test_interface_hops_count() {
        let mut registry = standard_registry();
        let printable = ClassBuilder::interface("Printable").register(&mut registry);
        let pretty = ClassBuilder::interface("Pretty")
            .implements(printable)
            .register(&mut registry);
        let doc = ClassBuilder::class("Doc")
            .implements(pretty)
            .register(&mut registry);

        assert_eq!(assignment_distance(&registry, pretty, Some(doc)), 1);
        assert_eq!(assignment_distance(&registry, printable, Some(doc)), 2);
        assert_eq!(assignment_distance(&registry, doc, Some(printable)), NOT_ASSIGNABLE);
    }

    #[test]
    fn test_arity_mismatch_not_assignable() {
        let (registry, core) = fixture();

        let m = DeclarationMatcher::new(&registry, &[core.int, core.int]);
        assert!(!m.pass(&[Some(core.int)]).assignable());
        assert!(!m.pass(&[Some(core.int); 3]).assignable());
    }

    #[test]
    fn test_varargs_matching() {
        let (registry, core) = fixture();

        let m = DeclarationMatcher::new(&registry, &[core.str, core.number]).varargs();
        assert_eq!(m.pass(&[Some(core.str)]).distance(), 0);
        assert_eq!(m.pass(&[Some(core.str), Some(core.int)]).distance(), 1);
        assert_eq!(
            m.pass(&[Some(core.str), Some(core.int), Some(core.long)]).distance(),
            2
        );
        assert!(!m.pass(&[Some(core.str), Some(core.str)]).assignable());
        assert!(!m.pass(&[]).assignable());
    }
}
