//! Core types and traits for the floe array crates.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the floe workspace:
//! runtime element-kind descriptors, the kind registry, the element
//! capability traits, and the error types shared by every access path.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod error;
pub mod kind;
pub mod registry;

pub use element::{Element, PrimitiveElement};
pub use error::ArrayError;
pub use kind::ElemKind;
pub use registry::KindRegistry;
