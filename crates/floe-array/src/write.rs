//! Typed mutable array buffers (the write phase of the lifecycle).
//!
//! An [`ArrayBuf`] owns its backing storage exclusively and is branded
//! with its region's lifetime, so it cannot leave the region that
//! allocated it. [`ArrayBuf::freeze`] consumes the buffer and yields the
//! immutable, shareable [`Array`].

use std::marker::PhantomData;

use floe_core::{ArrayError, ElemKind, Element};

use crate::read::{Array, Prefix};

/// A typed, fixed-length mutable array within an active mutation region.
///
/// Length is fixed at allocation and never changes. All indexed
/// operations are bounds-checked and fail with
/// [`ArrayError::IndexOutOfBounds`] rather than panicking.
#[derive(Debug)]
pub struct ArrayBuf<'r, T: Element> {
    slots: Vec<Option<T>>,
    _region: PhantomData<fn(&'r ()) -> &'r ()>,
}

impl<'r, T: Element> ArrayBuf<'r, T> {
    /// Allocate a buffer with every slot at the kind's default.
    ///
    /// Only reachable through [`Region::alloc`](crate::Region::alloc),
    /// which supplies the brand.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: vec![T::empty_slot(); len],
            _region: PhantomData,
        }
    }

    /// The buffer's fixed length.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the buffer has zero length.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The runtime descriptor of the element kind.
    pub fn kind(&self) -> ElemKind {
        T::kind()
    }

    /// Read the slot at `index`: the present value or `None` if absent.
    pub fn get(&self, index: usize) -> Result<Option<&T>, ArrayError> {
        self.check_bounds(index)?;
        Ok(self.slots[index].as_ref())
    }

    /// Read the slot at `index`, requiring a value to be present.
    ///
    /// Fails with [`ArrayError::MissingValue`] on an absent slot.
    pub fn get_required(&self, index: usize) -> Result<&T, ArrayError> {
        self.get(index)?
            .ok_or(ArrayError::MissingValue { index })
    }

    /// Write the slot at `index`; `None` clears it.
    ///
    /// Clearing a slot of a primitive kind fails with
    /// [`ArrayError::NullInPrimitive`] — primitive storage has no absence
    /// representation.
    pub fn set(&mut self, index: usize, value: Option<T>) -> Result<(), ArrayError> {
        self.check_bounds(index)?;
        if value.is_none() && T::is_primitive() {
            return Err(ArrayError::NullInPrimitive {
                kind: T::kind(),
                index,
            });
        }
        self.slots[index] = value;
        Ok(())
    }

    /// Write a definite value at `index`. Legal for every element kind.
    pub fn set_required(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        self.check_bounds(index)?;
        self.slots[index] = Some(value);
        Ok(())
    }

    /// Apply `f` to the value at `index` if one is present.
    ///
    /// An in-bounds absent slot is a no-op, not an error. The slot keeps
    /// its current value until the replacement exists, so a panicking
    /// `f` leaves the buffer unchanged.
    pub fn modify(&mut self, index: usize, f: impl FnOnce(T) -> T) -> Result<(), ArrayError> {
        self.check_bounds(index)?;
        if let Some(value) = self.slots[index].clone() {
            self.slots[index] = Some(f(value));
        }
        Ok(())
    }

    /// Apply `f` to the value at `index`, requiring presence.
    ///
    /// Same unwind behavior as [`ArrayBuf::modify`]: a panicking `f`
    /// leaves the slot holding its previous value.
    pub fn modify_required(
        &mut self,
        index: usize,
        f: impl FnOnce(T) -> T,
    ) -> Result<(), ArrayError> {
        self.check_bounds(index)?;
        match self.slots[index].clone() {
            Some(value) => {
                self.slots[index] = Some(f(value));
                Ok(())
            }
            None => Err(ArrayError::MissingValue { index }),
        }
    }

    /// Freeze the buffer into an immutable, shareable array.
    ///
    /// One-way: the buffer is consumed, so further mutation of this
    /// handle does not compile.
    pub fn freeze(self) -> Array<T> {
        Array::from_slots(self.slots)
    }

    /// Direct positional write used by the bulk constructors, which
    /// guarantee in-bounds indices by construction.
    pub(crate) fn fill(&mut self, index: usize, value: Option<T>) {
        self.slots[index] = value;
    }

    /// Read-only view of the already-written slots `0..upto`.
    pub(crate) fn prefix(&self, upto: usize) -> Prefix<'_, T> {
        Prefix::new(&self.slots[..upto])
    }

    fn check_bounds(&self, index: usize) -> Result<(), ArrayError> {
        if index >= self.slots.len() {
            Err(ArrayError::IndexOutOfBounds {
                index,
                len: self.slots.len(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::with_region;

    #[test]
    fn set_then_get() {
        with_region(|region| {
            let mut buf = region.alloc::<String>(3);
            buf.set(1, Some("mid".to_string())).unwrap();
            assert_eq!(buf.get(1).unwrap(), Some(&"mid".to_string()));
            assert_eq!(buf.get(0).unwrap(), None);
        });
    }

    #[test]
    fn set_none_clears_nullable_slot() {
        with_region(|region| {
            let mut buf = region.alloc::<String>(1);
            buf.set_required(0, "x".to_string()).unwrap();
            buf.set(0, None).unwrap();
            assert_eq!(buf.get(0).unwrap(), None);
        });
    }

    #[test]
    fn set_none_on_primitive_kind_is_rejected() {
        with_region(|region| {
            let mut buf = region.alloc::<i32>(2);
            let err = buf.set(0, None).unwrap_err();
            assert_eq!(
                err,
                ArrayError::NullInPrimitive {
                    kind: ElemKind::of::<i32>(),
                    index: 0,
                }
            );
            // The slot is untouched by the failed call.
            assert_eq!(buf.get(0).unwrap(), Some(&0));
            // A definite write still succeeds and is observable.
            buf.set(0, Some(9)).unwrap();
            assert_eq!(buf.get(0).unwrap(), Some(&9));
        });
    }

    #[test]
    fn bounds_are_checked_at_length_for_any_length() {
        with_region(|region| {
            let mut buf = region.alloc::<u8>(3);
            assert_eq!(
                buf.get(3).unwrap_err(),
                ArrayError::IndexOutOfBounds { index: 3, len: 3 }
            );
            assert_eq!(
                buf.set(3, Some(1)).unwrap_err(),
                ArrayError::IndexOutOfBounds { index: 3, len: 3 }
            );

            let empty = region.alloc::<u8>(0);
            assert_eq!(
                empty.get(0).unwrap_err(),
                ArrayError::IndexOutOfBounds { index: 0, len: 0 }
            );
        });
    }

    #[test]
    fn get_required_distinguishes_absent_from_out_of_bounds() {
        with_region(|region| {
            let buf = region.alloc::<String>(2);
            assert_eq!(
                buf.get_required(0).unwrap_err(),
                ArrayError::MissingValue { index: 0 }
            );
            assert_eq!(buf.get(0).unwrap(), None);
            assert_eq!(
                buf.get_required(2).unwrap_err(),
                ArrayError::IndexOutOfBounds { index: 2, len: 2 }
            );
        });
    }

    #[test]
    fn modify_skips_absent_slots() {
        with_region(|region| {
            let mut buf = region.alloc::<String>(2);
            buf.set_required(0, "a".to_string()).unwrap();
            buf.modify(0, |s| s + "b").unwrap();
            buf.modify(1, |s| s + "b").unwrap(); // absent: no-op
            assert_eq!(buf.get(0).unwrap(), Some(&"ab".to_string()));
            assert_eq!(buf.get(1).unwrap(), None);
        });
    }

    #[test]
    fn modify_required_fails_on_absent_slot() {
        with_region(|region| {
            let mut buf = region.alloc::<String>(1);
            assert_eq!(
                buf.modify_required(0, |s| s).unwrap_err(),
                ArrayError::MissingValue { index: 0 }
            );

            let mut nums = region.alloc::<u64>(1);
            nums.modify_required(0, |n| n + 5).unwrap();
            assert_eq!(nums.get(0).unwrap(), Some(&5));
        });
    }

    #[test]
    fn modify_panic_leaves_the_slot_holding_its_value() {
        with_region(|region| {
            let mut buf = region.alloc::<i32>(1);
            buf.set_required(0, 5).unwrap();
            let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let _ = buf.modify(0, |_| panic!("mid-update"));
            }));
            assert!(unwound.is_err());
            // A primitive-kind slot must never be observed absent.
            assert_eq!(buf.get(0).unwrap(), Some(&5));

            let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let _ = buf.modify_required(0, |_| panic!("mid-update"));
            }));
            assert!(unwound.is_err());
            assert_eq!(buf.get(0).unwrap(), Some(&5));
        });
    }

    #[test]
    fn freeze_preserves_contents_and_length() {
        let frozen = with_region(|region| {
            let mut buf = region.alloc::<u32>(5);
            buf.set_required(4, 44).unwrap();
            buf.freeze()
        });
        assert_eq!(frozen.len(), 5);
        assert_eq!(frozen.get(4).unwrap(), Some(&44));
        assert_eq!(frozen.get(0).unwrap(), Some(&0));
    }
}
