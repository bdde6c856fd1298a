use super::RootTable;
use crate::zq::Modulus;
use crate::{Error, Result};
use pss_util::bit_reverse;

/// Number-Theoretic Transform operator.
///
/// For a table of order `m` and an operator of size `n`, let `w = root^(m/n)`.
/// The forward transform maps coefficients `a` (natural order) to the
/// evaluations `a(w^rev(i))`, where `rev` reverses `log2(n)` bits; output `i`
/// is therefore the evaluation at `root^rev_m(i)` with `rev_m` reversing
/// `log2(m)` bits, whatever the size of the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NttOperator {
    p: Modulus,
    p_twice: u64,
    size: usize,
    omegas: Box<[u64]>,
    omegas_shoup: Box<[u64]>,
    omegas_inv: Box<[u64]>,
    omegas_inv_shoup: Box<[u64]>,
    size_inv: u64,
    size_inv_shoup: u64,
}

impl NttOperator {
    /// Create an NTT operator of size `size` over a root table.
    ///
    /// Aborts if the size is not a power of 2 dividing the order of the table
    /// in debug mode.
    pub(crate) fn new(table: &RootTable, size: usize) -> Result<Self> {
        debug_assert!(size.is_power_of_two() && size <= table.order());

        let p = table.modulus();
        let size_inv = p
            .inv(p.reduce(size as u64))
            .ok_or_else(|| Error::Default("The size is not invertible".to_string()))?;

        // The twiddle for the i-th block of the level with m = 2^s blocks is
        // w_{2m}^rev_s(i), that is root^((order / 2m) * rev_s(i)).
        let mut omegas = Vec::with_capacity(size);
        let mut omegas_inv = Vec::with_capacity(size);
        omegas.push(1);
        omegas_inv.push(1);
        for k in 1..size {
            let s = k.ilog2() as usize;
            let exponent = (table.order() >> (s + 1)) * bit_reverse(k - (1 << s), s);
            omegas.push(table.power(exponent));
            omegas_inv.push(table.power(table.order() - exponent));
        }

        let omegas_shoup = p.shoup_vec(&omegas);
        let omegas_inv_shoup = p.shoup_vec(&omegas_inv);

        Ok(Self {
            p: p.clone(),
            p_twice: p.modulus() * 2,
            size,
            omegas: omegas.into_boxed_slice(),
            omegas_shoup: omegas_shoup.into_boxed_slice(),
            omegas_inv: omegas_inv.into_boxed_slice(),
            omegas_inv_shoup: omegas_inv_shoup.into_boxed_slice(),
            size_inv,
            size_inv_shoup: p.shoup(size_inv),
        })
    }

    /// Returns the size of the transform.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Compute the forward NTT in place.
    /// Aborts if a is not of the size handled by the operator.
    pub fn forward(&self, a: &mut [u64]) {
        assert_eq!(a.len(), self.size);

        let mut l = self.size >> 1;
        let mut m = 1;
        let mut k = 1;
        while l > 0 {
            for block in a.chunks_exact_mut(2 * l) {
                let omega = self.omegas[k];
                let omega_shoup = self.omegas_shoup[k];
                k += 1;

                let (lo, hi) = block.split_at_mut(l);
                for (x, y) in lo.iter_mut().zip(hi.iter_mut()) {
                    self.butterfly(x, y, omega, omega_shoup);
                }
            }
            debug_assert_eq!(k, 2 * m);
            l >>= 1;
            m <<= 1;
        }

        a.iter_mut().for_each(|ai| *ai = self.reduce3(*ai));
    }

    /// Compute the backward NTT in place.
    /// Aborts if a is not of the size handled by the operator.
    pub fn backward(&self, a: &mut [u64]) {
        assert_eq!(a.len(), self.size);

        let mut m = self.size >> 1;
        let mut l = 1;
        while m > 0 {
            for (i, block) in a.chunks_exact_mut(2 * l).enumerate() {
                let zeta_inv = self.omegas_inv[m + i];
                let zeta_inv_shoup = self.omegas_inv_shoup[m + i];

                let (lo, hi) = block.split_at_mut(l);
                for (x, y) in lo.iter_mut().zip(hi.iter_mut()) {
                    self.inv_butterfly(x, y, zeta_inv, zeta_inv_shoup);
                }
            }
            l <<= 1;
            m >>= 1;
        }

        a.iter_mut()
            .for_each(|ai| *ai = self.p.mul_shoup(*ai, self.size_inv, self.size_inv_shoup));
    }

    /// Reduce a modulo p.
    ///
    /// Aborts if a >= 4 * p.
    const fn reduce3(&self, a: u64) -> u64 {
        debug_assert!(a < 2 * self.p_twice);

        let y = Modulus::reduce1(a, self.p_twice);
        Modulus::reduce1(y, self.p.p)
    }

    /// NTT Butterfly.
    fn butterfly(&self, x: &mut u64, y: &mut u64, w: u64, w_shoup: u64) {
        debug_assert!(*x < 2 * self.p_twice);
        debug_assert!(*y < 2 * self.p_twice);

        *x = Modulus::reduce1(*x, self.p_twice);
        let t = self.p.lazy_mul_shoup(*y, w, w_shoup);
        *y = *x + self.p_twice - t;
        *x += t;

        debug_assert!(*x < 2 * self.p_twice);
        debug_assert!(*y < 2 * self.p_twice);
    }

    /// Inverse NTT butterfly.
    fn inv_butterfly(&self, x: &mut u64, y: &mut u64, z: u64, z_shoup: u64) {
        debug_assert!(*x < self.p_twice);
        debug_assert!(*y < self.p_twice);

        let t = *x;
        *x = Modulus::reduce1(*y + t, self.p_twice);
        *y = self.p.lazy_mul_shoup(self.p_twice + t - *y, z, z_shoup);

        debug_assert!(*x < self.p_twice);
        debug_assert!(*y < self.p_twice);
    }
}

#[cfg(test)]
mod tests {
    use crate::ntt::{primitive_root_of_unity, RootTable};
    use crate::zq::Modulus;
    use pss_util::bit_reverse;
    use rand::thread_rng;
    use std::error::Error;

    const PRIMES: [u64; 3] = [998244353, 2013265921, 0xffffee001];

    fn horner(q: &Modulus, a: &[u64], x: u64) -> u64 {
        a.iter().rev().fold(0, |acc, ai| q.add(q.mul(acc, x), *ai))
    }

    #[test]
    fn constructor() -> Result<(), Box<dyn Error>> {
        for p in PRIMES {
            let q = Modulus::new(p)?;
            let table = RootTable::new(&q, primitive_root_of_unity(&q, 1 << 10).unwrap())?;
            for log_size in 0..=10 {
                let op = table.operator(1 << log_size)?;
                assert_eq!(op.size(), 1 << log_size);
            }
        }
        Ok(())
    }

    #[test]
    fn forward_evaluates_in_bit_reversed_order() -> Result<(), Box<dyn Error>> {
        let mut rng = thread_rng();
        for p in PRIMES {
            let q = Modulus::new(p)?;
            let table = RootTable::new(&q, primitive_root_of_unity(&q, 256).unwrap())?;
            for size in [1, 2, 4, 16, 64, 256] {
                let op = table.operator(size)?;
                let a = q.random_vec(size, &mut rng);
                let mut b = a.clone();
                op.forward(&mut b);
                for (i, bi) in b.iter().enumerate() {
                    // Evaluation point root^rev(i), bits counted over the full order.
                    let x = table.power(bit_reverse(i, table.log_order()));
                    assert_eq!(*bi, horner(&q, &a, x));
                }
            }
        }
        Ok(())
    }

    #[test]
    fn bijection() -> Result<(), Box<dyn Error>> {
        let mut rng = thread_rng();
        for p in PRIMES {
            let q = Modulus::new(p)?;
            let table = RootTable::new(&q, primitive_root_of_unity(&q, 1 << 12).unwrap())?;
            for log_size in 0..=12 {
                let op = table.operator(1 << log_size)?;
                let a = q.random_vec(1 << log_size, &mut rng);
                let mut b = a.clone();

                op.forward(&mut b);
                assert!(b.iter().all(|bi| *bi < p));
                op.backward(&mut b);
                assert_eq!(a, b);

                op.backward(&mut b);
                assert!(b.iter().all(|bi| *bi < p));
                op.forward(&mut b);
                assert_eq!(a, b);
            }
        }
        Ok(())
    }

    #[test]
    fn largest_values() -> Result<(), Box<dyn Error>> {
        // 2^62 - 57 is 3 mod 4: no transform of size 4 exists.
        let q = Modulus::new(4611686018427387847)?;
        assert!(primitive_root_of_unity(&q, 4).is_none());

        let p = crate::zq::primes::generate_prime(62, 1 << 10, 1 << 62).unwrap();
        let q = Modulus::new(p)?;
        let table = RootTable::new(&q, primitive_root_of_unity(&q, 1 << 10).unwrap())?;
        let op = table.operator(1 << 10)?;
        let a = vec![p - 1; 1 << 10];
        let mut b = a.clone();
        op.forward(&mut b);
        op.backward(&mut b);
        assert_eq!(a, b);
        Ok(())
    }
}
