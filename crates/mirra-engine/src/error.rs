//! Resolution and invocation errors
//!
//! Every failure is synchronous and surfaced immediately; the original cause
//! of a member-body failure is preserved as the error source.

use mirra_types::NativeError;

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Failure of a resolution or invocation step
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No type with the given name is loaded
    #[error("no type named `{name}` is loaded")]
    UnknownType {
        /// Requested type name
        name: String,
    },

    /// The member name is absent at every hierarchy level
    #[error("no member named `{name}` on `{type_name}`")]
    NoSuchMember {
        /// Type the resolution started at
        type_name: String,
        /// Requested member name
        name: String,
    },

    /// Candidates exist under the name, but none accepts the arguments
    #[error("no applicable overload of `{name}` on `{type_name}` for ({args})")]
    NoApplicableOverload {
        /// Type the resolution started at
        type_name: String,
        /// Requested member name
        name: String,
        /// Rendered argument type list
        args: String,
    },

    /// Two or more candidates tie at the minimum distance
    #[error("ambiguous overload of `{name}` on `{type_name}`: {candidates}")]
    AmbiguousOverload {
        /// Type the resolution started at
        type_name: String,
        /// Requested member name
        name: String,
        /// Rendered tied candidate signatures
        candidates: String,
    },

    /// The access relaxation was refused by the active policy
    #[error("access to `{name}` on `{type_name}` denied by policy")]
    AccessDenied {
        /// Declaring type of the member
        type_name: String,
        /// Member name
        name: String,
    },

    /// The member body raised during execution
    #[error("invocation of `{name}` failed")]
    InvocationFailure {
        /// Member name
        name: String,
        /// Original failure raised by the body
        #[source]
        source: NativeError,
    },

    /// A value does not fit the declared type it is being used as
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual value or type rendering
        got: String,
    },

    /// An instance member was resolved on a target without a receiver
    #[error("instance member `{name}` requires a receiver")]
    MissingReceiver {
        /// Member name
        name: String,
    },
}
