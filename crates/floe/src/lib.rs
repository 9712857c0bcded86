//! floe: fixed-length arrays with a mutable-then-frozen lifecycle.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the floe sub-crates. For most users, adding `floe` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use floe::prelude::*;
//!
//! // Mutate inside a region, then freeze. The frozen handle is the only
//! // thing that can leave the closure.
//! let labels = with_region(|region| {
//!     let mut buf = region.alloc::<String>(3);
//!     buf.set_required(0, "ice".to_string())?;
//!     buf.set(2, Some("floe".to_string()))?;
//!     Ok::<_, ArrayError>(buf.freeze())
//! })
//! .unwrap();
//! assert_eq!(labels.len(), 3);
//! assert_eq!(labels.get(1).unwrap(), None);
//!
//! // Memoized recurrences via dependency-ordered generation: each slot
//! // may read the already-computed slots only.
//! let fib = Array::generate(8, |i, prev| {
//!     Ok(if i < 2 {
//!         1u64
//!     } else {
//!         prev.get_required(i - 1)? + prev.get_required(i - 2)?
//!     })
//! })
//! .unwrap();
//! assert_eq!(fib.get_required(7).unwrap(), &21);
//! ```
//!
//! # Access paths
//!
//! Code whose element type implements [`Element`](types::Element) uses
//! the capability-typed handles ([`Array`](array::Array),
//! [`ArrayBuf`](array::ArrayBuf)): no runtime type checks, absence and
//! primitive-kind contracts enforced statically where possible. Code
//! generic over an unconstrained element type uses the reflective handles
//! ([`DynArray`](array::DynArray), [`DynArrayBuf`](array::DynArrayBuf)),
//! which dispatch through a runtime kind tag and can fail with
//! `TypeMismatch`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: element kinds, capability traits, errors, and the kind
/// registry (`floe-core`).
pub use floe_core as types;

/// Array handles, regions, and bulk construction (`floe-array`).
pub use floe_array as array;

/// Common imports for typical floe usage.
///
/// ```rust
/// use floe::prelude::*;
/// ```
pub mod prelude {
    pub use floe_array::{
        with_region, Array, ArrayBuf, DynArray, DynArrayBuf, Prefix, Region,
    };
    pub use floe_core::{ArrayError, ElemKind, Element, KindRegistry, PrimitiveElement};
}
