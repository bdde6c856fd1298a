//! Number-Theoretic Transforms over the cyclic group generated by a root of
//! unity of power-of-two order.

mod native;
mod roots;

pub use native::NttOperator;
pub use roots::{RootTable, MAX_LOG_ORDER};

use crate::zq::Modulus;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Returns whether a modulus p is prime and supports a cyclic Number Theoretic
/// Transform of size n.
///
/// Aborts if n is not a power of 2 in debug mode.
pub fn supports_ntt(p: u64, n: usize) -> bool {
    debug_assert!(n.is_power_of_two());

    p % (n as u64) == 1 % (n as u64) && pss_util::is_prime(p)
}

/// Returns an element of multiplicative order exactly `order` modulo p.
///
/// The search is deterministic. Returns None if `order` is not a power of two,
/// or if p does not support a transform of that size.
pub fn primitive_root_of_unity(p: &Modulus, order: usize) -> Option<u64> {
    if !order.is_power_of_two() || !supports_ntt(p.modulus(), order) {
        return None;
    }
    if order == 1 {
        return Some(1);
    }

    let lambda = (p.modulus() - 1) / (order as u64);

    let mut rng: ChaCha8Rng = SeedableRng::seed_from_u64(0);
    for _ in 0..100 {
        let root = p.pow(rng.gen_range(0..p.modulus()), lambda);
        if is_primitive_root(root, order, p) {
            return Some(root);
        }
    }

    None
}

/// Returns whether a is an n-th primitive root of unity, for n a power of two.
///
/// Aborts if a >= p in debug mode.
fn is_primitive_root(a: u64, n: usize, p: &Modulus) -> bool {
    debug_assert!(a < p.modulus());

    // For n a power of two, a^n = 1 and a^(n/2) != 1 characterize the order.
    (p.pow(a, n as u64) == 1) && (p.pow(a, (n / 2) as u64) != 1)
}
