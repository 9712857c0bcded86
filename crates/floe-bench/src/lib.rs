//! Benchmark fixtures for the floe array crates.
//!
//! Provides pre-built arrays in the shapes the benchmarks exercise:
//! dense primitive sequences, sparse nullable arrays, and their erased
//! counterparts.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use floe_array::{Array, DynArray};

/// A dense `u64` array `[0, 1, .., n-1]`.
pub fn dense_u64(n: usize) -> Array<u64> {
    Array::from_seq(0..n as u64)
}

/// A nullable string array of length `n` with every 4th slot present.
pub fn sparse_strings(n: usize) -> Array<String> {
    Array::from_options((0..n).map(|i| {
        if i % 4 == 0 {
            Some(format!("s{i}"))
        } else {
            None
        }
    }))
}

/// The erased counterpart of [`dense_u64`].
pub fn erased_u64(n: usize) -> DynArray {
    dense_u64(n).erase()
}
