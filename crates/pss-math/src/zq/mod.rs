//! Ring operations for moduli up to 62 bits.

pub mod primes;

use crate::{Error, Result};
use itertools::Itertools;
use pss_util::is_prime;
use rand::{CryptoRng, Rng, RngCore};

/// Structure encapsulating an integer modulus up to 62 bits.
///
/// This value replaces any ambient "current prime" state: every field
/// operation and every transform goes through an explicit `Modulus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modulus {
    pub(crate) p: u64,
    p_twice: u64,
}

impl Modulus {
    /// Create a modulus from an integer of at most 62 bits.
    pub fn new(p: u64) -> Result<Self> {
        if p < 2 || (p >> 62) != 0 {
            Err(Error::InvalidModulus(p))
        } else {
            Ok(Self { p, p_twice: 2 * p })
        }
    }

    /// Returns the value of the modulus.
    pub const fn modulus(&self) -> u64 {
        self.p
    }

    /// Returns whether the modulus is a prime.
    pub fn is_prime(&self) -> bool {
        is_prime(self.p)
    }

    /// Modular addition of a and b in constant time.
    ///
    /// Aborts if a >= p or b >= p in debug mode.
    pub const fn add(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.p && b < self.p);
        Self::reduce1(a + b, self.p)
    }

    /// Modular subtraction of a and b in constant time.
    ///
    /// Aborts if a >= p or b >= p in debug mode.
    pub const fn sub(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.p && b < self.p);
        Self::reduce1(a + self.p - b, self.p)
    }

    /// Modular negation in constant time.
    ///
    /// Aborts if a >= p in debug mode.
    pub const fn neg(&self, a: u64) -> u64 {
        debug_assert!(a < self.p);
        Self::reduce1(self.p - a, self.p)
    }

    /// Modular multiplication of a and b.
    ///
    /// Aborts if a >= p or b >= p in debug mode.
    pub const fn mul(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.p && b < self.p);
        ((a as u128 * b as u128) % (self.p as u128)) as u64
    }

    /// Compute the Shoup representation of a, i.e. floor(a * 2^64 / p).
    ///
    /// Aborts if a >= p in debug mode.
    pub const fn shoup(&self, a: u64) -> u64 {
        debug_assert!(a < self.p);
        (((a as u128) << 64) / (self.p as u128)) as u64
    }

    /// Compute the Shoup representation of each entry of a vector.
    ///
    /// Aborts if any of the values of the vector is >= p in debug mode.
    pub fn shoup_vec(&self, a: &[u64]) -> Vec<u64> {
        a.iter().map(|ai| self.shoup(*ai)).collect_vec()
    }

    /// Shoup multiplication of a and b, where b_shoup is the Shoup
    /// representation of b. The result is fully reduced.
    ///
    /// Aborts if b >= p or b_shoup != shoup(b) in debug mode.
    pub const fn mul_shoup(&self, a: u64, b: u64, b_shoup: u64) -> u64 {
        Self::reduce1(self.lazy_mul_shoup(a, b, b_shoup), self.p)
    }

    /// Lazy Shoup multiplication of a and b: the result is in [0, 2p).
    ///
    /// Any a < 2^64 is accepted, which the transforms rely on.
    /// Aborts if b >= p or b_shoup != shoup(b) in debug mode.
    pub const fn lazy_mul_shoup(&self, a: u64, b: u64, b_shoup: u64) -> u64 {
        debug_assert!(b < self.p);
        debug_assert!(b_shoup == self.shoup(b));

        let q = ((a as u128) * (b_shoup as u128)) >> 64;
        let r = ((a as u128) * (b as u128) - q * (self.p as u128)) as u64;

        debug_assert!(r < self.p_twice);
        r
    }

    /// Reduce a modulo p.
    pub const fn reduce(&self, a: u64) -> u64 {
        a % self.p
    }

    /// Reduce each entry of a vector modulo p in place.
    pub fn reduce_vec(&self, a: &mut [u64]) {
        a.iter_mut().for_each(|ai| *ai = self.reduce(*ai));
    }

    /// Modular exponentiation by squaring.
    ///
    /// Aborts if a >= p in debug mode.
    pub fn pow(&self, a: u64, n: u64) -> u64 {
        debug_assert!(a < self.p);

        if n == 0 {
            return Self::reduce1(1, self.p);
        }

        let mut r = a;
        let mut i = 62 - n.leading_zeros() as isize;
        while i >= 0 {
            r = self.mul(r, r);
            if (n >> i) & 1 == 1 {
                r = self.mul(r, a);
            }
            i -= 1;
        }
        r
    }

    /// Modular inversion using Fermat's little theorem.
    ///
    /// Returns None if a = 0; the modulus is assumed to be prime.
    /// Aborts if a >= p in debug mode.
    pub fn inv(&self, a: u64) -> Option<u64> {
        if a == 0 {
            None
        } else {
            let r = self.pow(a, self.p - 2);
            debug_assert_eq!(self.mul(a, r), 1);
            Some(r)
        }
    }

    /// Sample a uniform element of the field.
    pub fn random<R: RngCore + CryptoRng>(&self, rng: &mut R) -> u64 {
        rng.gen_range(0..self.p)
    }

    /// Sample a vector of `size` uniform elements of the field, in order.
    pub fn random_vec<R: RngCore + CryptoRng>(&self, size: usize, rng: &mut R) -> Vec<u64> {
        (0..size).map(|_| self.random(rng)).collect_vec()
    }

    /// Conditionally subtract p from a, for a < 2 * p.
    pub(crate) const fn reduce1(a: u64, p: u64) -> u64 {
        debug_assert!(p >> 63 == 0);
        debug_assert!(a < 2 * p);

        let (y, borrow) = a.overflowing_sub(p);
        if borrow {
            a
        } else {
            y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Modulus;
    use num_bigint::BigUint;
    use num_traits::ToPrimitive;
    use proptest::collection::vec as prop_vec;
    use proptest::prelude::*;
    use rand::thread_rng;

    // Primes that support transforms of size up to 2^21 and beyond.
    const PRIMES: [u64; 4] = [998244353, 469762049, 2013265921, 0xffffee001];

    fn big_mul(a: u64, b: u64, p: u64) -> u64 {
        ((BigUint::from(a) * BigUint::from(b)) % BigUint::from(p))
            .to_u64()
            .unwrap()
    }

    #[test]
    fn constructor() {
        for p in [2u64, 3, 17, 1987, 4611686018427387903] {
            assert!(Modulus::new(p).is_ok())
        }
        for p in [0u64, 1, 4611686018427387904, u64::MAX] {
            assert!(Modulus::new(p).is_err())
        }
    }

    #[test]
    fn primality() {
        for p in PRIMES {
            assert!(Modulus::new(p).unwrap().is_prime());
        }
        assert!(!Modulus::new(1 << 20).unwrap().is_prime());
    }

    #[test]
    fn small_values() {
        let q = Modulus::new(17).unwrap();
        assert_eq!(q.add(16, 1), 0);
        assert_eq!(q.sub(0, 1), 16);
        assert_eq!(q.neg(0), 0);
        assert_eq!(q.neg(1), 16);
        assert_eq!(q.mul(4, 5), 3);
        assert_eq!(q.pow(3, 0), 1);
        assert_eq!(q.pow(3, 16), 1);
        assert_eq!(q.inv(3), Some(6));
        assert_eq!(q.inv(0), None);
    }

    #[test]
    fn random_vec() {
        let mut rng = thread_rng();
        for p in PRIMES {
            let q = Modulus::new(p).unwrap();
            let v = q.random_vec(1000, &mut rng);
            assert_eq!(v.len(), 1000);
            assert!(v.iter().all(|vi| *vi < p));
            assert!(v.iter().any(|vi| *vi != v[0]));
        }
    }

    proptest! {
        #[test]
        fn add_sub_neg(a: u64, b: u64) {
            for p in PRIMES {
                let q = Modulus::new(p).unwrap();
                let (a, b) = (q.reduce(a), q.reduce(b));
                prop_assert_eq!(q.add(a, b), ((a as u128 + b as u128) % p as u128) as u64);
                prop_assert_eq!(q.add(q.sub(a, b), b), a);
                prop_assert_eq!(q.add(a, q.neg(a)), 0);
            }
        }

        #[test]
        fn mul(a: u64, b: u64) {
            for p in PRIMES {
                let q = Modulus::new(p).unwrap();
                let (a, b) = (q.reduce(a), q.reduce(b));
                prop_assert_eq!(q.mul(a, b), big_mul(a, b, p));
            }
        }

        #[test]
        fn mul_shoup(a: u64, b: u64) {
            for p in PRIMES {
                let q = Modulus::new(p).unwrap();
                let b = q.reduce(b);
                let b_shoup = q.shoup(b);
                let expected = big_mul(q.reduce(a), b, p);
                // The lazy variant accepts any 64-bit input.
                let lazy = q.lazy_mul_shoup(a, b, b_shoup);
                prop_assert!(lazy < 2 * p);
                prop_assert_eq!(lazy % p, expected);
                prop_assert_eq!(q.mul_shoup(q.reduce(a), b, b_shoup), expected);
            }
        }

        #[test]
        fn shoup_vec(a in prop_vec(any::<u64>(), 1..128)) {
            for p in PRIMES {
                let q = Modulus::new(p).unwrap();
                let mut a = a.clone();
                q.reduce_vec(&mut a);
                let a_shoup = q.shoup_vec(&a);
                for (ai, ai_shoup) in a.iter().zip(a_shoup.iter()) {
                    prop_assert_eq!(*ai_shoup, q.shoup(*ai));
                }
            }
        }

        #[test]
        fn pow_inv(a: u64, n in 0u64..1000) {
            for p in PRIMES {
                let q = Modulus::new(p).unwrap();
                let a = q.reduce(a);
                let expected = BigUint::from(a)
                    .modpow(&BigUint::from(n), &BigUint::from(p))
                    .to_u64()
                    .unwrap();
                prop_assert_eq!(q.pow(a, n), expected);
                if a != 0 {
                    let a_inv = q.inv(a).unwrap();
                    prop_assert_eq!(q.mul(a, a_inv), 1);
                }
            }
        }
    }
}
