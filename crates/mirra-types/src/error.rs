//! Error type for native member bodies

/// Failure raised by a native field initializer, method, or constructor body.
///
/// The engine wraps these into its own invocation-failure error, preserving
/// the original as the source for diagnostic chaining.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NativeError {
    /// Type mismatch during argument or receiver conversion
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Invalid argument (wrong count, missing receiver, out of range)
    #[error("argument error: {0}")]
    ArgumentError(String),

    /// Error raised by the member body itself
    #[error("{0}")]
    Raised(String),
}

impl From<String> for NativeError {
    fn from(s: String) -> Self {
        NativeError::Raised(s)
    }
}

impl From<&str> for NativeError {
    fn from(s: &str) -> Self {
        NativeError::Raised(s.to_string())
    }
}
