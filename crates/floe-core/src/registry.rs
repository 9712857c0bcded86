//! Registry of element kinds known to a runtime.
//!
//! The array core itself never needs a registry — capability-typed code
//! derives descriptors from the trait, and erased descriptors are built on
//! demand. The registry is the collaborator interface for hosts that
//! allocate arrays by descriptor value: register the kinds a runtime
//! supports up front, then look descriptors up by type or by name.

use std::any::{Any, TypeId};

use indexmap::IndexMap;

use crate::element::Element;
use crate::kind::ElemKind;

/// A registry mapping element types to their [`ElemKind`] descriptors.
///
/// Uses `IndexMap` (not `HashMap`) for deterministic registration-order
/// iteration, which keeps diagnostics and host-side kind listings stable.
#[derive(Clone, Debug, Default)]
pub struct KindRegistry {
    kinds: IndexMap<TypeId, ElemKind>,
}

impl KindRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            kinds: IndexMap::new(),
        }
    }

    /// Register a capability-typed kind and return its descriptor.
    ///
    /// Re-registering the same type is idempotent.
    pub fn register<T: Element>(&mut self) -> ElemKind {
        let kind = ElemKind::of::<T>();
        self.kinds.insert(kind.type_id(), kind);
        kind
    }

    /// Register an erased kind for a type with no capability binding.
    ///
    /// If the type was already registered with its capability, the
    /// capability descriptor is kept — it carries strictly more
    /// information (primitive flag, allocation default).
    pub fn register_erased<T: Any + Send + Sync>(&mut self) -> ElemKind {
        let kind = ElemKind::erased::<T>();
        *self.kinds.entry(kind.type_id()).or_insert(kind)
    }

    /// Look up the descriptor registered for a type.
    pub fn lookup(&self, type_id: TypeId) -> Option<ElemKind> {
        self.kinds.get(&type_id).copied()
    }

    /// Look up a descriptor by its type name.
    ///
    /// Linear scan; intended for diagnostics and host glue, not hot paths.
    pub fn lookup_name(&self, name: &str) -> Option<ElemKind> {
        self.kinds.values().find(|k| k.name() == name).copied()
    }

    /// Iterate over registered kinds in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ElemKind> {
        self.kinds.values()
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no kinds are registered.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
