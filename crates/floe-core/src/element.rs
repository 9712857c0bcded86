//! Element capability traits and implementations for standard kinds.
//!
//! [`Element`] is the capability a type implements to unlock the typed
//! array API: typed allocation, indexed access, bulk construction, and the
//! content-hash fold. [`PrimitiveElement`] refines it for value kinds that
//! can never be absent, changing the allocation default and forbidding
//! explicit "absent" writes.

use std::fmt;

use crate::kind::ElemKind;

/// The capability an element type implements to be storable in a typed
/// array.
///
/// Generic algorithms over arrays are written once against this trait and
/// instantiated per element type. The provided methods encode the
/// nullable-kind defaults; the [`PrimitiveElement`] impls override them.
///
/// `Hash` is deliberately not a supertrait: the array content hash goes
/// through [`Element::hash_value`] instead, which lets `f32`/`f64` qualify
/// by hashing their bit patterns.
pub trait Element: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// A 64-bit hash of one element, folded into the array content hash.
    fn hash_value(&self) -> u64;

    /// The value placed in every slot at allocation time.
    ///
    /// `None` for nullable kinds (slots start absent); primitive kinds
    /// return their zero value so slots always hold something.
    fn empty_slot() -> Option<Self> {
        None
    }

    /// Whether this kind stores a value in every slot (never absent).
    ///
    /// Primitive kinds reject explicit "absent" writes at the API
    /// boundary rather than silently coercing them.
    fn is_primitive() -> bool {
        false
    }

    /// The runtime descriptor for this kind.
    fn kind() -> ElemKind {
        ElemKind::of::<Self>()
    }
}

/// Marker refinement for element kinds whose slots always hold a value.
///
/// Implementors must keep the [`Element`] provided methods in sync:
/// `empty_slot()` returns `Some(Self::default())`, `is_primitive()` returns
/// `true`. The [`impl_primitive_element!`](macro@crate::impl_primitive_element)
/// macro generates both impls together so they cannot drift.
pub trait PrimitiveElement: Element + Copy + Default {}

/// Implements [`Element`] and [`PrimitiveElement`] for always-present
/// value kinds that implement `Hash`.
///
/// Zero value is `Default::default()`; the element hash is `fxhash` over
/// the value. Floating-point kinds are implemented by hand instead (they
/// hash their bit patterns).
#[macro_export]
macro_rules! impl_primitive_element {
    ($($t:ty),* $(,)?) => {$(
        impl $crate::element::Element for $t {
            fn hash_value(&self) -> u64 {
                ::fxhash::hash64(self)
            }

            fn empty_slot() -> Option<Self> {
                Some(<$t>::default())
            }

            fn is_primitive() -> bool {
                true
            }
        }

        impl $crate::element::PrimitiveElement for $t {}
    )*};
}

impl_primitive_element!(i8, i16, i32, i64, i128, isize);
impl_primitive_element!(u8, u16, u32, u64, u128, usize);
impl_primitive_element!(bool, char);

impl Element for f32 {
    fn hash_value(&self) -> u64 {
        fxhash::hash64(&self.to_bits())
    }

    fn empty_slot() -> Option<Self> {
        Some(0.0)
    }

    fn is_primitive() -> bool {
        true
    }
}

impl PrimitiveElement for f32 {}

impl Element for f64 {
    fn hash_value(&self) -> u64 {
        fxhash::hash64(&self.to_bits())
    }

    fn empty_slot() -> Option<Self> {
        Some(0.0)
    }

    fn is_primitive() -> bool {
        true
    }
}

impl PrimitiveElement for f64 {}

impl Element for String {
    fn hash_value(&self) -> u64 {
        fxhash::hash64(self)
    }
}

impl Element for &'static str {
    fn hash_value(&self) -> u64 {
        fxhash::hash64(self)
    }
}
