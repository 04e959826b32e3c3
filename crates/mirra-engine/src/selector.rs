//! Best-Match Selector
//!
//! Picks one member out of a name bucket for one concrete argument list.
//! Shadowing resolves first: when the same signature appears at several
//! hierarchy levels, only the most-derived declaration stays a candidate.
//! Distance scoring then filters out non-assignable candidates and keeps
//! the minimum; a tie at the minimum is an ambiguous overload and is
//! reported as such, never silently broken.
//!
//! Fixed-arity candidates form a first resolution phase; variable-arity
//! candidates only compete when no fixed-arity candidate accepts the
//! arguments.

use std::sync::Arc;

use mirra_types::{TypeId, TypeRegistry};

use crate::catalog::MemberDescriptor;
use crate::matcher::DeclarationMatcher;

/// Selection failure, contextualized into a `ResolveError` by the caller
#[derive(Debug)]
pub enum SelectionError {
    /// Candidates exist, none accepts the arguments
    NoApplicable,
    /// Two or more candidates tie at the minimum distance; carries their
    /// rendered signatures
    Ambiguous(Vec<String>),
}

/// Drop candidates shadowed by a more-derived declaration with an identical
/// signature. The bucket is most-derived first, so the first occurrence of
/// each signature survives.
fn unshadowed(candidates: &[Arc<MemberDescriptor>]) -> Vec<Arc<MemberDescriptor>> {
    let mut kept: Vec<Arc<MemberDescriptor>> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let shadowed = kept.iter().any(|seen| {
            seen.is_static == candidate.is_static
                && seen.params() == candidate.params()
                && seen.is_varargs() == candidate.is_varargs()
        });
        if !shadowed {
            kept.push(candidate.clone());
        }
    }
    kept
}

/// Select the single best candidate for the given argument types
pub fn select_best(
    registry: &TypeRegistry,
    candidates: &[Arc<MemberDescriptor>],
    args: &[Option<TypeId>],
) -> Result<Arc<MemberDescriptor>, SelectionError> {
    let (fixed, varargs): (Vec<_>, Vec<_>) = unshadowed(candidates)
        .into_iter()
        .partition(|c| !c.is_varargs());

    match pick_minimum(registry, fixed, args) {
        Err(SelectionError::NoApplicable) => pick_minimum(registry, varargs, args),
        other => other,
    }
}

fn pick_minimum(
    registry: &TypeRegistry,
    candidates: Vec<Arc<MemberDescriptor>>,
    args: &[Option<TypeId>],
) -> Result<Arc<MemberDescriptor>, SelectionError> {
    let mut scored: Vec<(Arc<MemberDescriptor>, u32)> = Vec::new();
    for candidate in candidates {
        let Some(params) = candidate.params() else {
            continue;
        };
        let mut matcher = DeclarationMatcher::new(registry, params);
        if candidate.is_varargs() {
            matcher = matcher.varargs();
        }
        let result = matcher.pass(args);
        if result.assignable() {
            scored.push((candidate, result.distance()));
        }
    }

    let Some(best) = scored.iter().map(|(_, d)| *d).min() else {
        return Err(SelectionError::NoApplicable);
    };

    let mut winners: Vec<Arc<MemberDescriptor>> = scored
        .into_iter()
        .filter(|(_, d)| *d == best)
        .map(|(c, _)| c)
        .collect();

    if winners.len() > 1 {
        return Err(SelectionError::Ambiguous(
            winners.iter().map(|c| c.signature(registry)).collect(),
        ));
    }
    Ok(winners.remove(0))
}
