//! Bulk construction of frozen arrays.
//!
//! Each constructor runs its own internal mutation region: allocate,
//! populate, freeze. A failure aborts the remaining writes and drops the
//! unfrozen buffer — a partially built array is never observable.

use smallvec::SmallVec;

use floe_core::{ArrayError, Element};

use crate::read::{Array, Prefix};
use crate::region::with_region;

impl<T: Element> Array<T> {
    /// Build an array from an ordered sequence, one element per index.
    ///
    /// Length equals the sequence length; every slot is present.
    pub fn from_seq(xs: impl IntoIterator<Item = T>) -> Self {
        let xs: Vec<T> = xs.into_iter().collect();
        with_region(|region| {
            let mut buf = region.alloc::<T>(xs.len());
            for (index, value) in xs.into_iter().enumerate() {
                buf.fill(index, Some(value));
            }
            buf.freeze()
        })
    }

    /// Build an array from an index-implicit optional sequence.
    ///
    /// Length equals the sequence length. Present entries are written at
    /// their positional index; absent entries leave the slot at its
    /// allocation default (absent, or zero for primitive kinds).
    pub fn from_options(xs: impl IntoIterator<Item = Option<T>>) -> Self {
        let xs: Vec<Option<T>> = xs.into_iter().collect();
        with_region(|region| {
            let mut buf = region.alloc::<T>(xs.len());
            for (index, slot) in xs.into_iter().enumerate() {
                if let Some(value) = slot {
                    buf.fill(index, Some(value));
                }
            }
            buf.freeze()
        })
    }

    /// Build an array from (index, value) pairs.
    ///
    /// Length is `max(index) + 1`, or 0 for an empty input. Pairs are
    /// written in input order, so duplicate indices are last-write-wins;
    /// unmentioned indices stay at the allocation default.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, T)>) -> Self {
        // Buffered for the max-index pre-pass; small pair sets stay
        // off the heap.
        let pairs: SmallVec<[(usize, T); 8]> = pairs.into_iter().collect();
        let len = index_span(pairs.iter().map(|(index, _)| *index));
        with_region(|region| {
            let mut buf = region.alloc::<T>(len);
            for (index, value) in pairs {
                buf.fill(index, Some(value));
            }
            buf.freeze()
        })
    }

    /// Build an array by dependency-ordered generation.
    ///
    /// For `i` in `0..len`, in strictly increasing order, computes
    /// `f(i, prefix)` where `prefix` exposes exactly the already-computed
    /// slots `0..i`; the result is written at `i` before `i + 1` is
    /// started, so each slot holds a fully evaluated value before later
    /// slots can read it. A generator that reads at or beyond its own
    /// index gets [`ArrayError::IndexOutOfBounds`] from the view.
    ///
    /// This supports memoized recurrences without deferred values:
    ///
    /// ```
    /// use floe_array::Array;
    ///
    /// let fib = Array::generate(5, |i, prev| {
    ///     Ok(if i < 2 {
    ///         1u64
    ///     } else {
    ///         prev.get_required(i - 1)? + prev.get_required(i - 2)?
    ///     })
    /// })
    /// .unwrap();
    /// assert_eq!(fib.values().copied().collect::<Vec<_>>(), vec![1, 1, 2, 3, 5]);
    /// ```
    pub fn generate<F>(len: usize, mut f: F) -> Result<Self, ArrayError>
    where
        F: FnMut(usize, &Prefix<'_, T>) -> Result<T, ArrayError>,
    {
        with_region(|region| {
            let mut buf = region.alloc::<T>(len);
            for index in 0..len {
                let value = f(index, &buf.prefix(index))?;
                buf.fill(index, Some(value));
            }
            Ok(buf.freeze())
        })
    }
}

/// Smallest length covering every index, 0 for an empty input.
///
/// Saturates at `usize::MAX` so a degenerate `usize::MAX` index is not
/// an arithmetic panic; allocation of such a length fails on its own
/// terms.
fn index_span(indices: impl Iterator<Item = usize>) -> usize {
    indices.map(|index| index.saturating_add(1)).max().unwrap_or(0)
}

impl<T: Element> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array::from_seq(iter)
    }
}
