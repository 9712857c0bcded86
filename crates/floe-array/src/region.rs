//! Mutation regions: scoped, sequential permission to mutate.
//!
//! A [`Region`] is a scope token, not a lock. All buffers allocated from
//! it are mutated by exactly one logical thread of control, in program
//! order, for the duration of one [`with_region`] call. The token carries
//! an invariant brand lifetime `'r`; buffers are branded with the same
//! lifetime, which is what keeps them from escaping the closure.

use std::any::Any;
use std::marker::PhantomData;

use floe_core::{ElemKind, Element};

use crate::dynamic::DynArrayBuf;
use crate::write::ArrayBuf;

/// A scope token granting mutable access to the buffers it allocates.
///
/// Created by [`with_region`] and discarded when the closure returns;
/// regions are never reused. The brand lifetime `'r` is invariant, so a
/// buffer branded with one region's lifetime cannot be coerced to
/// another's, and no buffer can outlive its region.
pub struct Region<'r> {
    _brand: PhantomData<fn(&'r ()) -> &'r ()>,
}

/// Run a mutation computation inside a fresh region.
///
/// The closure is higher-ranked over the brand lifetime, so its return
/// type cannot mention `'r`: mutable buffers cannot be returned, only
/// frozen arrays (or other region-independent data) can.
///
/// ```
/// use floe_array::with_region;
///
/// let frozen = with_region(|region| {
///     let mut buf = region.alloc::<u32>(3);
///     buf.set_required(0, 7).unwrap();
///     buf.freeze()
/// });
/// assert_eq!(frozen.get(0).unwrap(), Some(&7));
/// ```
pub fn with_region<R>(f: impl for<'r> FnOnce(&Region<'r>) -> R) -> R {
    let region = Region {
        _brand: PhantomData,
    };
    f(&region)
}

impl<'r> Region<'r> {
    /// Allocate a typed buffer of `len` slots within this region.
    ///
    /// Every slot starts at the kind's allocation default: absent for
    /// nullable kinds, the zero value for primitive kinds. `len == 0` is
    /// valid.
    pub fn alloc<T: Element>(&self, len: usize) -> ArrayBuf<'r, T> {
        ArrayBuf::new(len)
    }

    /// Allocate a type-erased buffer for the given element kind.
    ///
    /// This is the reflective-path allocation entry: the kind descriptor
    /// (typically obtained from a
    /// [`KindRegistry`](floe_core::KindRegistry)) supplies the slot
    /// default, so primitive kinds start zero-valued here too.
    pub fn alloc_kind(&self, kind: ElemKind, len: usize) -> DynArrayBuf<'r> {
        DynArrayBuf::new(kind, len)
    }

    /// Allocate a type-erased buffer for an arbitrary `'static` type with
    /// no capability binding.
    ///
    /// Shorthand for [`Region::alloc_kind`] with an erased descriptor;
    /// slots start absent.
    pub fn alloc_erased<T: Any + Send + Sync>(&self, len: usize) -> DynArrayBuf<'r> {
        self.alloc_kind(ElemKind::erased::<T>(), len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_allocation_starts_at_kind_default() {
        with_region(|region| {
            let nullable = region.alloc::<String>(4);
            assert_eq!(nullable.len(), 4);
            assert_eq!(nullable.get(0).unwrap(), None);

            let primitive = region.alloc::<i64>(4);
            assert_eq!(primitive.get(3).unwrap(), Some(&0));
        });
    }

    #[test]
    fn zero_length_allocation_is_valid() {
        with_region(|region| {
            let buf = region.alloc::<u8>(0);
            assert_eq!(buf.len(), 0);
            assert!(buf.is_empty());
        });
    }

    #[test]
    fn erased_allocation_starts_absent() {
        with_region(|region| {
            let buf = region.alloc_erased::<Vec<u8>>(2);
            assert_eq!(buf.len(), 2);
            assert_eq!(buf.get_value::<Vec<u8>>(0).unwrap(), None);
        });
    }

    #[test]
    fn kind_allocation_honors_primitive_default() {
        with_region(|region| {
            let buf = region.alloc_kind(ElemKind::of::<u32>(), 2);
            assert_eq!(buf.get_value::<u32>(1).unwrap(), Some(&0));
        });
    }

    #[test]
    fn multiple_buffers_per_region() {
        let (a, b) = with_region(|region| {
            let mut a = region.alloc::<u32>(1);
            let mut b = region.alloc::<String>(1);
            a.set_required(0, 1).unwrap();
            b.set_required(0, "x".to_string()).unwrap();
            (a.freeze(), b.freeze())
        });
        assert_eq!(a.get(0).unwrap(), Some(&1));
        assert_eq!(b.get(0).unwrap(), Some(&"x".to_string()));
    }
}
