//! Accessibility Override
//!
//! Visibility relaxation is scoped to exactly one field access or
//! invocation. The engine asks the active [`AccessPolicy`] to grant the
//! access, holds an [`AccessGrant`] for the duration of the one operation,
//! and releases it on every exit path through `Drop` — including panics and
//! error returns. No relaxation state is ever attached to a cached
//! descriptor, so two threads reusing the same descriptor cannot observe
//! each other's access window.

use crate::catalog::MemberDescriptor;

/// What an access grant is being requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// Field read
    Read,
    /// Field write
    Write,
    /// Method or constructor invocation
    Invoke,
}

/// One pending or active access, described to the policy
#[derive(Debug)]
pub struct AccessRequest<'a> {
    /// Member being accessed
    pub member: &'a MemberDescriptor,
    /// Kind of access
    pub kind: AccessKind,
}

/// External sandboxing hook deciding whether an access may relax visibility
pub trait AccessPolicy: Send + Sync {
    /// Whether the access may proceed
    fn grant(&self, request: &AccessRequest<'_>) -> bool;

    /// Notification that a previously granted access has ended
    fn release(&self, request: &AccessRequest<'_>) {
        let _ = request;
    }
}

/// Default policy: every access is granted
#[derive(Debug, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn grant(&self, _request: &AccessRequest<'_>) -> bool {
        true
    }
}

/// Call-local witness of one granted access; releases on drop
pub struct AccessGrant<'a> {
    policy: &'a dyn AccessPolicy,
    member: &'a MemberDescriptor,
    kind: AccessKind,
}

impl<'a> AccessGrant<'a> {
    /// Acquire a grant from an already-consulted policy
    pub(crate) fn new(
        policy: &'a dyn AccessPolicy,
        member: &'a MemberDescriptor,
        kind: AccessKind,
    ) -> Self {
        Self {
            policy,
            member,
            kind,
        }
    }
}

impl Drop for AccessGrant<'_> {
    fn drop(&mut self) {
        self.policy.release(&AccessRequest {
            member: self.member,
            kind: self.kind,
        });
    }
}
