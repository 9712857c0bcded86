//! Fixed-length arrays with a two-state lifecycle: mutable within a
//! region, then frozen and freely shareable.
//!
//! # Architecture
//!
//! ```text
//! with_region(|region| ...)        one-shot scope, brands all buffers
//! ├── ArrayBuf<'r, T: Element>     typed mutable handle (write phase)
//! │   └── freeze() → Array<T>      immutable, Arc-backed, shareable
//! ├── DynArrayBuf<'r>              type-erased mutable handle
//! │   └── freeze() → DynArray      immutable; downcast() → Array<T>
//! └── Prefix<'_, T>                partial read view used by generate()
//! ```
//!
//! # Access paths
//!
//! - **Capability-typed:** the element type implements
//!   [`Element`](floe_core::Element), which statically fixes allocation
//!   and access semantics. No runtime type checks, no `TypeMismatch`.
//! - **Reflective:** for type-variable contexts with no capability
//!   binding. Dispatch happens through the handle's
//!   [`ElemKind`](floe_core::ElemKind) tag; get/set can fail with
//!   `TypeMismatch` at runtime.
//!
//! # Lifecycle
//!
//! Buffers are branded with the region's invariant lifetime and cannot
//! escape the `with_region` closure; only frozen handles can. Freezing
//! consumes the buffer, so use-after-freeze does not compile. Frozen
//! handles are `Send + Sync` and clone by reference-count bump.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builders;
pub mod dynamic;
pub mod read;
pub mod region;
pub mod write;

pub use dynamic::{DynArray, DynArrayBuf};
pub use read::{Array, Prefix};
pub use region::{with_region, Region};
pub use write::ArrayBuf;
