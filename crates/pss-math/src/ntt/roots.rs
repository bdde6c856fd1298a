use super::NttOperator;
use crate::{zq::Modulus, Error, Result};

/// Largest supported log2 of the order of a root of unity. The table holds
/// two `u64` per power, so the largest table takes 4 GiB.
pub const MAX_LOG_ORDER: usize = 28;

/// Table of the powers of a root of unity, together with their Shoup
/// representations.
///
/// `power(i) = root^i` for `0 <= i <= order`, so that both `power(0)` and
/// `power(order)` are 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootTable {
    p: Modulus,
    order: usize,
    log_order: usize,
    powers: Box<[u64]>,
    powers_shoup: Box<[u64]>,
}

impl RootTable {
    /// Create the table of powers of `root` modulo p.
    ///
    /// The powers are accumulated from 1 until they return to 1, and the
    /// number of steps is the order of the root. Returns an error if that
    /// order is not a power of two of at most `2^MAX_LOG_ORDER`; larger roots
    /// are rejected before any power is stored.
    pub fn new(p: &Modulus, root: u64) -> Result<Self> {
        let root = p.reduce(root);
        if !(0..=MAX_LOG_ORDER).any(|k| p.pow(root, 1u64 << k) == 1) {
            return Err(Error::InvalidRoot(format!(
                "the order of {} modulo {} is not a power of two below 2^{}",
                root,
                p.modulus(),
                MAX_LOG_ORDER
            )));
        }

        let root_shoup = p.shoup(root);
        let mut powers = vec![1u64];
        let mut power = 1u64;
        loop {
            power = p.mul_shoup(power, root, root_shoup);
            powers.push(power);
            if power == 1 {
                break;
            }
        }

        let order = powers.len() - 1;
        if !order.is_power_of_two() {
            return Err(Error::InvalidRoot(format!(
                "the root order must be a power of two, found {}",
                order
            )));
        }

        let powers_shoup = p.shoup_vec(&powers);
        Ok(Self {
            p: p.clone(),
            order,
            log_order: order.trailing_zeros() as usize,
            powers: powers.into_boxed_slice(),
            powers_shoup: powers_shoup.into_boxed_slice(),
        })
    }

    /// Returns the modulus of the table.
    pub fn modulus(&self) -> &Modulus {
        &self.p
    }

    /// Returns the root of unity.
    pub fn root(&self) -> u64 {
        self.powers[1]
    }

    /// Returns the multiplicative order of the root.
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Returns log2 of the order of the root.
    pub const fn log_order(&self) -> usize {
        self.log_order
    }

    /// Returns root^i.
    ///
    /// Aborts if i > order.
    pub fn power(&self, i: usize) -> u64 {
        self.powers[i]
    }

    /// Returns the Shoup representation of root^i.
    ///
    /// Aborts if i > order.
    pub fn power_shoup(&self, i: usize) -> u64 {
        self.powers_shoup[i]
    }

    /// Multiplies the coefficient of index i by root^i, i.e. maps a(x) to
    /// a(root * x).
    pub fn twist(&self, a: &mut [u64]) {
        a.iter_mut().enumerate().for_each(|(i, ai)| {
            let j = i % self.order;
            *ai = self
                .p
                .mul_shoup(*ai, self.powers[j], self.powers_shoup[j])
        });
    }

    /// Multiplies the coefficient of index i by root^(-i), i.e. maps a(x) to
    /// a(x / root).
    pub fn untwist(&self, a: &mut [u64]) {
        a.iter_mut().enumerate().for_each(|(i, ai)| {
            let j = self.order - (i % self.order);
            *ai = self
                .p
                .mul_shoup(*ai, self.powers[j], self.powers_shoup[j])
        });
    }

    /// Create an NTT operator of the given size over this table.
    ///
    /// Returns an error if the size is not a power of two dividing the order.
    pub fn operator(&self, size: usize) -> Result<NttOperator> {
        if !size.is_power_of_two() || size > self.order {
            Err(Error::InvalidSize(size, self.order))
        } else {
            NttOperator::new(self, size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RootTable, MAX_LOG_ORDER};
    use crate::{
        ntt::primitive_root_of_unity,
        zq::{primes::generate_prime, Modulus},
        Error,
    };
    use rand::thread_rng;
    use std::error::Error as StdError;

    #[test]
    fn table() -> Result<(), Box<dyn StdError>> {
        let q = Modulus::new(998244353)?;
        for log_order in [0, 1, 4, 10, 16] {
            let order = 1 << log_order;
            let root = primitive_root_of_unity(&q, order).unwrap();
            let table = RootTable::new(&q, root)?;

            assert_eq!(table.order(), order);
            assert_eq!(table.log_order(), log_order);
            assert_eq!(table.power(0), 1);
            assert_eq!(table.power(order), 1);
            for i in 0..=order {
                assert_eq!(table.power(i), q.pow(root, i as u64));
                assert_eq!(table.power_shoup(i), q.shoup(table.power(i)));
            }
        }
        Ok(())
    }

    #[test]
    fn rejects_non_power_of_two_order() -> Result<(), Box<dyn StdError>> {
        // 3 generates the multiplicative group of 998244353, whose order is
        // 2^23 * 7 * 17, so 3^(2^23 * 17) has order 7.
        let q = Modulus::new(998244353)?;
        let root = q.pow(3, (1 << 23) * 17);
        assert!(matches!(
            RootTable::new(&q, root),
            Err(Error::InvalidRoot(_))
        ));

        // A generator of the whole group has too large an order.
        assert!(matches!(RootTable::new(&q, 3), Err(Error::InvalidRoot(_))));

        // Zero never returns to 1.
        assert!(matches!(RootTable::new(&q, 0), Err(Error::InvalidRoot(_))));
        Ok(())
    }

    #[test]
    fn rejects_order_above_max() -> Result<(), Box<dyn StdError>> {
        let prime = generate_prime(62, 1 << (MAX_LOG_ORDER + 2), 1 << 62).unwrap();
        let q = Modulus::new(prime)?;
        let root = primitive_root_of_unity(&q, 1 << (MAX_LOG_ORDER + 1)).unwrap();
        assert!(matches!(
            RootTable::new(&q, root),
            Err(Error::InvalidRoot(_))
        ));
        Ok(())
    }

    #[test]
    fn twist_untwist() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let q = Modulus::new(2013265921)?;
        let table = RootTable::new(&q, primitive_root_of_unity(&q, 64).unwrap())?;

        // Longer than the order, to exercise the index wrap-around.
        let a = q.random_vec(100, &mut rng);
        let mut b = a.clone();
        table.twist(&mut b);
        for (i, (ai, bi)) in a.iter().zip(b.iter()).enumerate() {
            assert_eq!(*bi, q.mul(*ai, q.pow(table.root(), i as u64)));
        }
        table.untwist(&mut b);
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn operator_sizes() -> Result<(), Box<dyn StdError>> {
        let q = Modulus::new(998244353)?;
        let table = RootTable::new(&q, primitive_root_of_unity(&q, 32).unwrap())?;
        for size in [1, 2, 4, 8, 16, 32] {
            assert!(table.operator(size).is_ok());
        }
        assert_eq!(table.operator(64).unwrap_err(), Error::InvalidSize(64, 32));
        assert_eq!(table.operator(12).unwrap_err(), Error::InvalidSize(12, 32));
        Ok(())
    }
}
