#![crate_name = "pss_util"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Utilities for the packed secret sharing library.

use num_bigint_dig::{prime::probably_prime, BigUint};

/// Returns whether the modulus p is prime; this function is 100% accurate for
/// p < 2^64 with overwhelming probability.
pub fn is_prime(p: u64) -> bool {
    probably_prime(&BigUint::from(p), 0)
}

/// Reverses the `bits` least significant bits of `index`.
///
/// Aborts if `index` does not fit in `bits` bits in debug mode.
pub const fn bit_reverse(index: usize, bits: usize) -> usize {
    debug_assert!(bits >= usize::BITS as usize || index >> bits == 0);
    if bits == 0 {
        0
    } else {
        index.reverse_bits() >> (usize::BITS as usize - bits)
    }
}
