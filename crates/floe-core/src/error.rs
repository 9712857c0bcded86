//! Error types shared by the typed and reflective access paths.

use std::error::Error;
use std::fmt;

use crate::kind::ElemKind;

/// Errors from array operations.
///
/// All failures are synchronous and local: a failing call leaves every
/// other slot of the handle untouched, and the core never retries. Bulk
/// constructors abort remaining writes on the first failure and discard
/// the unfrozen buffer.
///
/// Indices are `usize`, so the "negative index" contract violation is
/// unrepresentable; only the upper bound is checked at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// The index is outside `[0, len)`. Raised by every indexed operation,
    /// including on zero-length arrays.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The handle's length.
        len: usize,
    },
    /// A required read found the slot absent.
    ///
    /// The caller of a required read is responsible for proving presence;
    /// this is the intentionally unsafe fast path failing loudly.
    MissingValue {
        /// The slot that held no value.
        index: usize,
    },
    /// An explicit "absent" write into a primitive-kind array.
    ///
    /// Primitive storage cannot represent a missing slot, so the optional
    /// write API is defended at the boundary instead of coercing silently.
    NullInPrimitive {
        /// The array's element kind.
        kind: ElemKind,
        /// The slot the write targeted.
        index: usize,
    },
    /// Reflective path: the caller's value or requested type disagrees
    /// with the array's runtime element kind.
    TypeMismatch {
        /// The element kind the array actually stores.
        expected: ElemKind,
        /// The type name the caller supplied or requested.
        actual: &'static str,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for array of length {len}")
            }
            Self::MissingValue { index } => {
                write!(f, "required value missing at index {index}")
            }
            Self::NullInPrimitive { kind, index } => {
                write!(
                    f,
                    "cannot clear index {index} of primitive array of {kind}"
                )
            }
            Self::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: array stores {expected}, caller used {actual}")
            }
        }
    }
}

impl Error for ArrayError {}
