/*!
 * Error Types
 * Errors surfaced by the checked type-erasure path
 */

use thiserror::Error;

/// Result type for signal operations
pub type SignalResult<T> = Result<T, SignalError>;

/// Signal operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// A checked downcast asked for a signature the registry does not
    /// store. The unchecked reinterpret path never reports this; it
    /// misdelivers instead.
    #[error("signature mismatch: registry stores {expected}, requested {requested}")]
    SignatureMismatch {
        expected: &'static str,
        requested: &'static str,
    },
}
