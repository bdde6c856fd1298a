//! Create parameters for packed secret sharing

use crate::{Error, ParametersError, Result};
use pss_math::{
    ntt::{NttOperator, RootTable},
    zq::Modulus,
};
use pss_util::bit_reverse;
use std::fmt::Debug;
use std::sync::Arc;

/// Block length of the transforms: `degree + 1` must be a multiple of it, and
/// share evaluations are computed over a multiple of it.
pub const MIN_BLOCK_LEN: usize = 16;

/// Parameters for packed secret sharing.
#[derive(PartialEq, Eq)]
pub struct PssParameters {
    /// Number of secrets packed in a polynomial.
    num_secrets: usize,

    /// Number of shares produced for a polynomial.
    num_shares: usize,

    /// Degree bound of a sharing polynomial.
    degree: usize,

    /// The prime field.
    pub(crate) modulus: Modulus,

    /// Powers of the root of unity.
    pub(crate) table: RootTable,

    /// Transform of size `degree + 1`.
    pub(crate) op_single: NttOperator,

    /// Transform of size `2 * (degree + 1)`.
    pub(crate) op_double: NttOperator,

    /// Transform covering the share evaluations.
    pub(crate) op_shares: NttOperator,

    /// Evaluation points of the secrets.
    secret_points: Box<[u64]>,

    /// Number of evaluations needed to read all the shares.
    share_eval_len: usize,
}

impl Debug for PssParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PssParameters")
            .field("num_secrets", &self.num_secrets)
            .field("num_shares", &self.num_shares)
            .field("degree", &self.degree)
            .field("prime", &self.modulus.modulus())
            .field("order", &self.table.order())
            .finish()
    }
}

impl PssParameters {
    /// Returns the number of secrets packed in a polynomial
    pub const fn num_secrets(&self) -> usize {
        self.num_secrets
    }

    /// Returns the number of shares
    pub const fn num_shares(&self) -> usize {
        self.num_shares
    }

    /// Returns the degree bound of the sharing polynomials
    pub const fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the prime modulus
    pub const fn prime(&self) -> u64 {
        self.modulus.modulus()
    }

    /// Returns the multiplicative order of the root of unity
    pub const fn order(&self) -> usize {
        self.table.order()
    }

    /// Returns log2 of the order of the root of unity
    pub const fn log_order(&self) -> usize {
        self.table.log_order()
    }

    /// Returns a reference to the field modulus
    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    /// Returns the root of unity
    pub fn root(&self) -> u64 {
        self.table.root()
    }

    /// Returns the evaluation points of the secrets.
    ///
    /// Secret `i` sits at `root^rev(i + order / 2)`, where `rev` reverses
    /// `log_order` bits: these are odd powers of the root.
    pub fn secret_points(&self) -> &[u64] {
        &self.secret_points
    }

    /// Returns the evaluation point of the share of a given index, or None if
    /// the index is not smaller than the number of shares.
    ///
    /// Shares are read at `root^rev(index)`, which for `index < order / 2` are
    /// even powers of the root. When there are more shares than `order / 2`,
    /// the remaining shares are read past the odd powers taken by the secrets.
    pub fn share_point(&self, index: usize) -> Option<u64> {
        if index >= self.num_shares {
            return None;
        }
        let half = self.order() >> 1;
        let position = if index < half || self.num_shares <= half {
            index
        } else {
            index + self.num_secrets
        };
        Some(self.table.power(bit_reverse(position, self.log_order())))
    }

    /// Returns the number of evaluations needed to read all the shares, a
    /// multiple of [`MIN_BLOCK_LEN`].
    pub const fn share_evaluation_len(&self) -> usize {
        self.share_eval_len
    }

    #[cfg(test)]
    #[allow(missing_docs)]
    pub fn default_arc(
        num_secrets: usize,
        num_shares: usize,
        degree: usize,
        log_order: usize,
    ) -> Arc<Self> {
        use pss_math::{ntt::primitive_root_of_unity, zq::primes::generate_prime};

        let prime = generate_prime(62, 1 << 21, 1 << 62).unwrap();
        let root = primitive_root_of_unity(&Modulus::new(prime).unwrap(), 1 << log_order).unwrap();
        PssParametersBuilder::new()
            .set_num_secrets(num_secrets)
            .set_num_shares(num_shares)
            .set_degree(degree)
            .set_prime(prime)
            .set_root(root)
            .build_arc()
            .unwrap()
    }
}

/// Builder for parameters for packed secret sharing.
#[derive(Debug)]
pub struct PssParametersBuilder {
    num_secrets: usize,
    num_shares: usize,
    degree: usize,
    prime: u64,
    root: u64,
}

impl PssParametersBuilder {
    /// Creates a new instance of the builder
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            num_secrets: Default::default(),
            num_shares: Default::default(),
            degree: Default::default(),
            prime: Default::default(),
            root: Default::default(),
        }
    }

    /// Sets the number of secrets packed in a polynomial. It must be between 1
    /// and `degree + 1`.
    pub fn set_num_secrets(&mut self, num_secrets: usize) -> &mut Self {
        self.num_secrets = num_secrets;
        self
    }

    /// Sets the number of shares. It must be at least `2 * degree + 1`.
    pub fn set_num_shares(&mut self, num_shares: usize) -> &mut Self {
        self.num_shares = num_shares;
        self
    }

    /// Sets the degree bound of the sharing polynomials. `degree + 1` must be
    /// a power of two and a multiple of [`MIN_BLOCK_LEN`].
    pub fn set_degree(&mut self, degree: usize) -> &mut Self {
        self.degree = degree;
        self
    }

    /// Sets the prime modulus, of at most 62 bits.
    pub fn set_prime(&mut self, prime: u64) -> &mut Self {
        self.prime = prime;
        self
    }

    /// Sets the root of unity. Its order modulo the prime must be a power of
    /// two, at least `2 * (2 * degree + 1)`.
    pub fn set_root(&mut self, root: u64) -> &mut Self {
        self.root = root;
        self
    }

    /// Build a new `PssParameters` inside an `Arc`.
    pub fn build_arc(&self) -> Result<Arc<PssParameters>> {
        self.build().map(Arc::new)
    }

    /// Build a new `PssParameters`.
    pub fn build(&self) -> Result<PssParameters> {
        // Check that degree + 1 is a power of 2 and a multiple of the block length.
        let block_len = match self.degree.checked_add(1) {
            Some(len) if len.is_power_of_two() => len,
            _ => {
                return Err(Error::ParametersError(ParametersError::InvalidDegree(
                    self.degree,
                )))
            }
        };
        if block_len % MIN_BLOCK_LEN != 0 {
            return Err(Error::ParametersError(
                ParametersError::DegreeNotBlockAligned(self.degree, MIN_BLOCK_LEN),
            ));
        }

        if self.num_secrets == 0 || self.num_secrets > block_len {
            return Err(Error::ParametersError(ParametersError::InvalidNumSecrets(
                self.num_secrets,
                block_len,
            )));
        }

        let min_shares = 2 * self.degree + 1;
        if self.num_shares < min_shares {
            return Err(Error::ParametersError(ParametersError::TooFewShares(
                self.num_shares,
                min_shares,
            )));
        }

        let modulus = Modulus::new(self.prime)
            .map_err(|e| Error::ParametersError(ParametersError::InvalidPrime(e.to_string())))?;
        if !modulus.is_prime() {
            return Err(Error::ParametersError(ParametersError::InvalidPrime(
                format!("{} is not a prime", self.prime),
            )));
        }

        let table = RootTable::new(&modulus, self.root)
            .map_err(|e| Error::ParametersError(ParametersError::InvalidRoot(e.to_string())))?;
        let order = table.order();
        if order / 2 < min_shares {
            return Err(Error::ParametersError(ParametersError::DomainTooSmall(
                order, min_shares,
            )));
        }
        if self.num_shares + self.num_secrets > order {
            return Err(Error::ParametersError(ParametersError::TooManyShares(
                self.num_shares,
                self.num_secrets,
                order,
            )));
        }

        // Past order / 2 shares, the evaluations must also cover the secrets.
        let share_eval_len = if self.num_shares > order / 2 {
            round_up(self.num_shares + self.num_secrets)
        } else {
            round_up(self.num_shares)
        };

        let op_single = table.operator(block_len)?;
        let op_double = table.operator(2 * block_len)?;
        let op_shares = table.operator(share_eval_len.next_power_of_two())?;

        let secret_points = (0..self.num_secrets)
            .map(|i| table.power(bit_reverse(i + order / 2, table.log_order())))
            .collect::<Vec<_>>();

        log::debug!(
            "Packed secret sharing parameters: {} secrets, {} shares, degree {}, order {}, share evaluations {} (transform of size {})",
            self.num_secrets,
            self.num_shares,
            self.degree,
            order,
            share_eval_len,
            op_shares.size()
        );

        Ok(PssParameters {
            num_secrets: self.num_secrets,
            num_shares: self.num_shares,
            degree: self.degree,
            modulus,
            table,
            op_single,
            op_double,
            op_shares,
            secret_points: secret_points.into_boxed_slice(),
            share_eval_len,
        })
    }
}

/// Rounds up to a multiple of the block length.
const fn round_up(n: usize) -> usize {
    n.div_ceil(MIN_BLOCK_LEN) * MIN_BLOCK_LEN
}
