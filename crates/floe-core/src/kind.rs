//! Runtime element-kind descriptors.
//!
//! An [`ElemKind`] identifies, at runtime, what values an array stores.
//! Capability-typed code obtains one through [`ElemKind::of`]; the
//! reflective path can describe any `'static` type via [`ElemKind::erased`],
//! at the cost of losing the kind's capability defaults.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::element::Element;

/// A boxed element value with its concrete type erased.
///
/// This is the storage currency of the reflective access path: every slot
/// of a type-erased array holds one of these (or nothing).
pub type BoxedValue = Box<dyn Any + Send + Sync>;

/// Runtime type descriptor for an array's element kind.
///
/// Fixed at array creation and carried by every handle. Two kinds are
/// equal exactly when they describe the same Rust type; the `name` and
/// `primitive` fields are derived from the type and exist for diagnostics
/// and for allocation defaults on the type-erased path.
#[derive(Clone, Copy)]
pub struct ElemKind {
    type_id: TypeId,
    name: &'static str,
    primitive: bool,
    /// Produces the slot contents used at allocation time: `None` for
    /// nullable kinds, the kind's zero value for primitive kinds.
    empty: fn() -> Option<BoxedValue>,
}

impl ElemKind {
    /// The descriptor for a capability-typed element kind.
    pub fn of<T: Element>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            primitive: T::is_primitive(),
            empty: empty_boxed::<T>,
        }
    }

    /// The descriptor for an arbitrary `'static` type with no capability
    /// binding.
    ///
    /// Erased kinds always use nullable-slot semantics: there is no
    /// capability to supply a zero value, so every slot starts absent.
    pub fn erased<T: Any + Send + Sync>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            primitive: false,
            empty: no_value,
        }
    }

    /// The `TypeId` of the element type this kind describes.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The element type's name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether slots of this kind always hold a value (never absent).
    pub fn is_primitive(&self) -> bool {
        self.primitive
    }

    /// The boxed contents of a freshly allocated slot of this kind.
    ///
    /// `None` for nullable kinds; `Some(zero)` for primitive kinds, which
    /// cannot represent a missing slot at the storage level.
    pub fn empty_slot(&self) -> Option<BoxedValue> {
        (self.empty)()
    }
}

fn empty_boxed<T: Element>() -> Option<BoxedValue> {
    T::empty_slot().map(|v| Box::new(v) as BoxedValue)
}

fn no_value() -> Option<BoxedValue> {
    None
}

impl PartialEq for ElemKind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ElemKind {}

impl Hash for ElemKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ElemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElemKind")
            .field("name", &self.name)
            .field("primitive", &self.primitive)
            .finish()
    }
}

impl fmt::Display for ElemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
