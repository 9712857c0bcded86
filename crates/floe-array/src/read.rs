//! Frozen arrays and partial read views (the read phase of the
//! lifecycle).
//!
//! An [`Array`] is the immutable result of freezing a buffer. It owns its
//! storage behind an `Arc`, so cloning is a reference-count bump and
//! concurrent readers need no synchronization — no further mutation is
//! possible by construction.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use floe_core::{ArrayError, ElemKind, Element};

use crate::dynamic::DynArray;

/// Multiplier of the content-hash fold.
const HASH_MIX: u64 = 31;

/// Seed of the content-hash fold.
const HASH_SEED: u64 = 1;

/// An immutable, fixed-length, freely shareable typed array.
///
/// Obtained by freezing an [`ArrayBuf`](crate::ArrayBuf) or through the
/// bulk constructors in [`builders`](crate::builders). Equality is
/// element-wise and structural; hashing is the documented multiplicative
/// fold over present slots (see [`Array::content_hash`]).
#[derive(Debug)]
pub struct Array<T: Element> {
    slots: Arc<[Option<T>]>,
}

impl<T: Element> Array<T> {
    /// Wrap freshly built slots. Crate-internal: arrays only come into
    /// existence by freezing a buffer.
    pub(crate) fn from_slots(slots: Vec<Option<T>>) -> Self {
        Self {
            slots: slots.into(),
        }
    }

    /// The array's fixed length.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the array has zero length.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The runtime descriptor of the element kind.
    pub fn kind(&self) -> ElemKind {
        T::kind()
    }

    /// Read the slot at `index`: the present value or `None` if absent.
    pub fn get(&self, index: usize) -> Result<Option<&T>, ArrayError> {
        if index >= self.slots.len() {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                len: self.slots.len(),
            });
        }
        Ok(self.slots[index].as_ref())
    }

    /// Read the slot at `index`, requiring a value to be present.
    pub fn get_required(&self, index: usize) -> Result<&T, ArrayError> {
        self.get(index)?
            .ok_or(ArrayError::MissingValue { index })
    }

    /// Lazy, restartable scan of the present values, in index order.
    ///
    /// Absent slots are skipped; elements are fetched on demand during
    /// iteration. Each call starts a fresh scan.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Scan of every slot in index order, yielding absence explicitly.
    ///
    /// The iterator's length always equals the array length.
    pub fn slots(&self) -> impl ExactSizeIterator<Item = Option<&T>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }

    /// The multiplicative content-hash fold.
    ///
    /// Left-to-right with seed 1: each present slot contributes
    /// `acc = 31 * acc + hash_value(elem)` (wrapping); absent slots leave
    /// the accumulator unchanged. This is the value the `Hash` impl
    /// writes, exposed for hosts that persist or compare hashes directly.
    pub fn content_hash(&self) -> u64 {
        let mut acc = HASH_SEED;
        for slot in self.slots.iter() {
            if let Some(value) = slot {
                acc = acc.wrapping_mul(HASH_MIX).wrapping_add(value.hash_value());
            }
        }
        acc
    }

    /// Type-erase into the reflective path, preserving the element kind.
    ///
    /// Elements are cloned into boxed storage; the erased handle remembers
    /// the kind tag (including primitive-ness), so reflective writes keep
    /// honoring this kind's contracts.
    pub fn erase(&self) -> DynArray {
        DynArray::from_typed(self)
    }

    /// Borrow the raw slot storage (crate-internal, used by erasure).
    pub(crate) fn raw_slots(&self) -> &[Option<T>] {
        &self.slots
    }
}

impl<T: Element> Clone for Array<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<T: Element> PartialEq for Array<T> {
    /// Structural element-wise equality.
    ///
    /// Arrays of different length are unequal without inspecting
    /// elements; otherwise the scan runs from the last index backward,
    /// short-circuiting on the first mismatch.
    fn eq(&self, other: &Self) -> bool {
        if self.slots.len() != other.slots.len() {
            return false;
        }
        self.slots
            .iter()
            .zip(other.slots.iter())
            .rev()
            .all(|(a, b)| a == b)
    }
}

impl<T: Element + Eq> Eq for Array<T> {}

impl<T: Element> Hash for Array<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.content_hash());
    }
}

/// A read-only view of the first `len` slots of a buffer under
/// construction.
///
/// [`Array::generate`] passes one of these to the generator: when slot
/// `i` is being computed, the view's length is `i`,
/// so a read of any not-yet-computed slot fails fast with
/// [`ArrayError::IndexOutOfBounds`] instead of silently observing a
/// default.
#[derive(Debug)]
pub struct Prefix<'a, T: Element> {
    slots: &'a [Option<T>],
}

impl<'a, T: Element> Prefix<'a, T> {
    pub(crate) fn new(slots: &'a [Option<T>]) -> Self {
        Self { slots }
    }

    /// Number of slots already computed and visible through this view.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots are visible yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read a visible slot: the present value or `None` if absent.
    pub fn get(&self, index: usize) -> Result<Option<&T>, ArrayError> {
        if index >= self.slots.len() {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                len: self.slots.len(),
            });
        }
        Ok(self.slots[index].as_ref())
    }

    /// Read a visible slot, requiring a value to be present.
    pub fn get_required(&self, index: usize) -> Result<&T, ArrayError> {
        self.get(index)?
            .ok_or(ArrayError::MissingValue { index })
    }
}
