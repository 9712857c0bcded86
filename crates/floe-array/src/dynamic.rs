//! The reflective (type-erased) access path.
//!
//! Used when the element type is a free type parameter with no
//! [`Element`] capability in scope. The handles carry an
//! [`ElemKind`] tag and dispatch every access through it: the same
//! bounds and absence contracts as the typed path, plus
//! [`ArrayError::TypeMismatch`] when a caller's value or requested type
//! disagrees with the tag. A well-typed program can still fail here at
//! runtime; every such failure is a signaled error, never a panic.

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use floe_core::kind::BoxedValue;
use floe_core::{ArrayError, ElemKind, Element};

use crate::read::Array;

/// A type-erased, fixed-length mutable array within an active mutation
/// region.
///
/// The write-phase half of the reflective path. Allocated by
/// [`Region::alloc_kind`](crate::Region::alloc_kind) or
/// [`Region::alloc_erased`](crate::Region::alloc_erased), and branded
/// with the region lifetime exactly like the typed buffer.
pub struct DynArrayBuf<'r> {
    kind: ElemKind,
    slots: Vec<Option<BoxedValue>>,
    _region: PhantomData<fn(&'r ()) -> &'r ()>,
}

impl<'r> DynArrayBuf<'r> {
    pub(crate) fn new(kind: ElemKind, len: usize) -> Self {
        Self {
            kind,
            slots: (0..len).map(|_| kind.empty_slot()).collect(),
            _region: PhantomData,
        }
    }

    /// The runtime element kind this handle is tagged with.
    pub fn kind(&self) -> ElemKind {
        self.kind
    }

    /// The buffer's fixed length.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the buffer has zero length.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read the slot at `index` as a `T`.
    ///
    /// Fails with [`ArrayError::TypeMismatch`] if `T` is not the tagged
    /// element kind. Bounds are checked first.
    pub fn get_value<T: Any>(&self, index: usize) -> Result<Option<&T>, ArrayError> {
        check_bounds(index, self.slots.len())?;
        self.check_kind::<T>()?;
        read_slot(&self.slots[index], self.kind)
    }

    /// Read the slot at `index` as a `T`, requiring presence.
    pub fn get_required_value<T: Any>(&self, index: usize) -> Result<&T, ArrayError> {
        self.get_value(index)?
            .ok_or(ArrayError::MissingValue { index })
    }

    /// Write the slot at `index`; `None` clears it.
    ///
    /// Fails with [`ArrayError::TypeMismatch`] if `T` is not the tagged
    /// kind, and with [`ArrayError::NullInPrimitive`] when clearing a
    /// slot of a primitive-tagged handle.
    pub fn set_value<T: Any + Send + Sync>(
        &mut self,
        index: usize,
        value: Option<T>,
    ) -> Result<(), ArrayError> {
        check_bounds(index, self.slots.len())?;
        self.check_kind::<T>()?;
        match value {
            None if self.kind.is_primitive() => Err(ArrayError::NullInPrimitive {
                kind: self.kind,
                index,
            }),
            None => {
                self.slots[index] = None;
                Ok(())
            }
            Some(value) => {
                self.slots[index] = Some(Box::new(value));
                Ok(())
            }
        }
    }

    /// Write a definite value at `index`. Legal for every tagged kind,
    /// subject to the type check.
    pub fn set_required_value<T: Any + Send + Sync>(
        &mut self,
        index: usize,
        value: T,
    ) -> Result<(), ArrayError> {
        check_bounds(index, self.slots.len())?;
        self.check_kind::<T>()?;
        self.slots[index] = Some(Box::new(value));
        Ok(())
    }

    /// Freeze the buffer into an immutable, shareable erased array.
    pub fn freeze(self) -> DynArray {
        DynArray {
            kind: self.kind,
            slots: self.slots.into(),
        }
    }

    fn check_kind<T: Any>(&self) -> Result<(), ArrayError> {
        if TypeId::of::<T>() == self.kind.type_id() {
            Ok(())
        } else {
            Err(ArrayError::TypeMismatch {
                expected: self.kind,
                actual: std::any::type_name::<T>(),
            })
        }
    }
}

impl fmt::Debug for DynArrayBuf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynArrayBuf")
            .field("kind", &self.kind)
            .field("len", &self.slots.len())
            .finish()
    }
}

/// An immutable, freely shareable type-erased array.
///
/// The frozen half of the reflective path. Obtained by freezing a
/// [`DynArrayBuf`] or by erasing a typed [`Array`];
/// [`DynArray::downcast`] converts back to the capability-typed path.
pub struct DynArray {
    kind: ElemKind,
    slots: Arc<[Option<BoxedValue>]>,
}

impl DynArray {
    /// Erase a typed array, cloning its elements into boxed storage.
    pub(crate) fn from_typed<T: Element>(array: &Array<T>) -> Self {
        let slots: Vec<Option<BoxedValue>> = array
            .raw_slots()
            .iter()
            .map(|slot| slot.as_ref().map(|v| Box::new(v.clone()) as BoxedValue))
            .collect();
        Self {
            kind: T::kind(),
            slots: slots.into(),
        }
    }

    /// The runtime element kind this handle is tagged with.
    pub fn kind(&self) -> ElemKind {
        self.kind
    }

    /// The array's fixed length.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the array has zero length.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read the slot at `index` as a `T`.
    pub fn get_value<T: Any>(&self, index: usize) -> Result<Option<&T>, ArrayError> {
        check_bounds(index, self.slots.len())?;
        if TypeId::of::<T>() != self.kind.type_id() {
            return Err(ArrayError::TypeMismatch {
                expected: self.kind,
                actual: std::any::type_name::<T>(),
            });
        }
        read_slot(&self.slots[index], self.kind)
    }

    /// Read the slot at `index` as a `T`, requiring presence.
    pub fn get_required_value<T: Any>(&self, index: usize) -> Result<&T, ArrayError> {
        self.get_value(index)?
            .ok_or(ArrayError::MissingValue { index })
    }

    /// Convert back to the capability-typed path, cloning the elements.
    ///
    /// Fails with [`ArrayError::TypeMismatch`] if `T` is not the tagged
    /// element kind.
    ///
    /// Absent slots map to the capability's allocation default. An
    /// erased-tagged handle may hold absences a primitive capability
    /// cannot represent; those come back as the kind's zero value, so
    /// the typed handle upholds the primitive every-slot-present
    /// contract.
    pub fn downcast<T: Element>(&self) -> Result<Array<T>, ArrayError> {
        if TypeId::of::<T>() != self.kind.type_id() {
            return Err(ArrayError::TypeMismatch {
                expected: self.kind,
                actual: std::any::type_name::<T>(),
            });
        }
        let slots: Vec<Option<T>> = self
            .slots
            .iter()
            .map(|slot| match slot {
                None => Ok(T::empty_slot()),
                Some(boxed) => boxed
                    .downcast_ref::<T>()
                    .cloned()
                    .map(Some)
                    .ok_or(ArrayError::TypeMismatch {
                        expected: self.kind,
                        actual: std::any::type_name::<T>(),
                    }),
            })
            .collect::<Result<_, _>>()?;
        Ok(Array::from_slots(slots))
    }
}

impl Clone for DynArray {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            slots: Arc::clone(&self.slots),
        }
    }
}

impl fmt::Debug for DynArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynArray")
            .field("kind", &self.kind)
            .field("len", &self.slots.len())
            .finish()
    }
}

fn check_bounds(index: usize, len: usize) -> Result<(), ArrayError> {
    if index >= len {
        Err(ArrayError::IndexOutOfBounds { index, len })
    } else {
        Ok(())
    }
}

/// Shared slot read: the tag was already checked, so a failed downcast
/// can only mean storage corruption; it is still reported, not assumed
/// away.
fn read_slot<T: Any>(slot: &Option<BoxedValue>, kind: ElemKind) -> Result<Option<&T>, ArrayError> {
    match slot {
        None => Ok(None),
        Some(boxed) => boxed
            .downcast_ref::<T>()
            .map(Some)
            .ok_or(ArrayError::TypeMismatch {
                expected: kind,
                actual: std::any::type_name::<T>(),
            }),
    }
}
