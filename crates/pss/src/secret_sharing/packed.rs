//! Packed secret sharing over a root-of-unity domain.
//!
//! A sharing polynomial of degree at most `degree` carries `num_secrets`
//! secrets as its evaluations at odd powers of the root, and the shares are
//! its evaluations at even powers. Both sets of evaluations are read from a
//! single bit-reversed transform.

use crate::secret_sharing::traits::SecretSharer;
use crate::{Error, Polynomial, PssParameters, Result, VerificationError};
use itertools::izip;
use pss_math::ntt::NttOperator;
use rand::{CryptoRng, RngCore};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use zeroize::Zeroizing;

/// Selects which values a random polynomial generator computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outputs {
    /// Compute the evaluations at the secret points.
    pub secrets: bool,
    /// Compute the shares.
    pub shares: bool,
    /// Return the polynomial.
    pub poly: bool,
}

impl Outputs {
    /// Request every output.
    pub const fn all() -> Self {
        Self {
            secrets: true,
            shares: true,
            poly: true,
        }
    }
}

/// Verification performed by [`PackedSecretSharing::reconstruct`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareCheck {
    /// Only the first `2 * (degree + 1)` shares are read.
    #[default]
    Skip,
    /// Require the interpolated polynomial to have degree at most
    /// `max_degree` and to agree with every share.
    AllShares {
        /// Largest accepted degree.
        max_degree: usize,
    },
}

/// Shares of a vector of secrets, with the polynomial that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sharing {
    /// The `num_shares` shares.
    pub shares: Vec<u64>,
    /// The sharing polynomial.
    pub poly: Polynomial,
}

/// Secrets recovered from shares, with the interpolated polynomial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    /// The `num_secrets` secrets.
    pub secrets: Vec<u64>,
    /// The interpolated polynomial.
    pub poly: Polynomial,
}

impl Reconstruction {
    /// Returns the degree of the interpolated polynomial, or None if it is
    /// zero.
    pub fn degree(&self) -> Option<usize> {
        self.poly.degree()
    }
}

/// Output of the random polynomial generators; each field is set only if it
/// was requested in [`Outputs`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RandomPoly {
    /// The evaluations at the secret points.
    pub secrets: Option<Vec<u64>>,
    /// The shares.
    pub shares: Option<Vec<u64>>,
    /// The polynomial.
    pub poly: Option<Polynomial>,
}

/// Packed secret sharing engine.
///
/// The engine can be shared between threads: the vanishing polynomial on the
/// secret points is built at most once, on first use.
#[derive(Debug)]
pub struct PackedSecretSharing {
    par: Arc<PssParameters>,
    vanishing: OnceLock<Polynomial>,
}

impl PackedSecretSharing {
    /// Create a new engine for the given parameters.
    pub fn new(par: &Arc<PssParameters>) -> Self {
        Self {
            par: par.clone(),
            vanishing: OnceLock::new(),
        }
    }

    /// Returns the parameters of the engine.
    pub fn parameters(&self) -> &Arc<PssParameters> {
        &self.par
    }

    /// Share `num_secrets` secrets.
    ///
    /// The sharing polynomial is uniformly random among the polynomials of
    /// degree at most `degree` taking the secrets at the secret points.
    pub fn share<R: RngCore + CryptoRng>(&self, secrets: &[u64], rng: &mut R) -> Result<Sharing> {
        Self::check_length(secrets.len(), self.par.num_secrets())?;

        let mut image = self.reduced(secrets);
        image.extend(
            self.par
                .modulus
                .random_vec(self.par.op_single.size() - secrets.len(), rng),
        );
        Ok(self.sharing_from_image(image))
    }

    /// Share `num_secrets` secrets deterministically: the free evaluations of
    /// the sharing polynomial are zero instead of random.
    pub fn deterministic_share(&self, secrets: &[u64]) -> Result<Sharing> {
        Self::check_length(secrets.len(), self.par.num_secrets())?;

        let mut image = self.reduced(secrets);
        image.resize(self.par.op_single.size(), 0);
        Ok(self.sharing_from_image(image))
    }

    /// Reconstruct the secrets from `num_shares` shares.
    ///
    /// Only the first `2 * (degree + 1)` shares are interpolated. With
    /// [`ShareCheck::AllShares`], the interpolated polynomial must also have a
    /// bounded degree and agree with the remaining shares, otherwise a
    /// [`VerificationError`] is returned.
    pub fn reconstruct(&self, shares: &[u64], check: ShareCheck) -> Result<Reconstruction> {
        Self::check_length(shares.len(), self.par.num_shares())?;

        let q = &self.par.modulus;
        let op = &self.par.op_double;
        let mut coefficients = vec![0u64; op.size()];
        izip!(coefficients.iter_mut(), shares).for_each(|(c, s)| *c = q.reduce(*s));
        op.backward(&mut coefficients);
        if shares.len() < op.size() {
            self.complete_last_sample(&mut coefficients)?;
        }
        let poly = Polynomial::new(coefficients);

        if let ShareCheck::AllShares { max_degree } = check {
            if let Err(e) = self.verify(&poly, shares, max_degree) {
                log::warn!("Share verification failed: {}", e);
                return Err(Error::VerificationError(e));
            }
        }

        let secrets = self.evaluate_on_secrets(&poly);
        Ok(Reconstruction { secrets, poly })
    }

    /// Generate a uniformly random polynomial of degree at most `degree`.
    pub fn generate_random_poly<R: RngCore + CryptoRng>(
        &self,
        outputs: Outputs,
        rng: &mut R,
    ) -> RandomPoly {
        let coefficients = self
            .par
            .modulus
            .random_vec(self.par.op_single.size(), rng);
        self.select_outputs(Polynomial::new(coefficients), outputs)
    }

    /// Generate a uniformly random polynomial of degree at most `2 * degree`
    /// whose evaluations at the secret points sum to zero.
    pub fn generate_random_poly_double_degree_zero_sum<R: RngCore + CryptoRng>(
        &self,
        outputs: Outputs,
        rng: &mut R,
    ) -> RandomPoly {
        let q = &self.par.modulus;
        let last = self.par.num_secrets() - 1;

        let mut image = q.random_vec(self.par.op_double.size(), rng);
        let sum = image[..last].iter().fold(0, |acc, x| q.add(acc, *x));
        image[last] = q.neg(sum);

        let mut poly = self.interpolate_on_secrets(&self.par.op_double, image);
        self.reduce_degree(&mut poly);
        self.select_outputs(poly, outputs)
    }

    /// Generate a uniformly random polynomial of degree at most `2 * degree`
    /// that vanishes at every secret point.
    pub fn generate_random_poly_double_degree_zero_on_secrets<R: RngCore + CryptoRng>(
        &self,
        outputs: Outputs,
        rng: &mut R,
    ) -> RandomPoly {
        let q = &self.par.modulus;
        let num_secrets = self.par.num_secrets();

        let mut image = vec![0u64; num_secrets];
        image.extend(q.random_vec(self.par.op_double.size() - num_secrets, rng));

        let mut poly = self.interpolate_on_secrets(&self.par.op_double, image);
        self.reduce_degree(&mut poly);
        self.select_outputs(poly, outputs)
    }

    /// Returns whether the shares of `poly` take the expected values. Indices
    /// that are not smaller than `num_shares` never match.
    pub fn check_consistency(&self, poly: &Polynomial, expected: &BTreeMap<usize, u64>) -> bool {
        let q = &self.par.modulus;
        let shares = self.poly_to_shares(poly);
        expected.iter().all(|(index, value)| {
            shares
                .get(*index)
                .is_some_and(|share| *share == q.reduce(*value))
        })
    }

    /// Returns whether `poly` has degree at most `2 * degree` and vanishes at
    /// every secret point.
    pub fn check_zero_on_secrets_double_degree(&self, poly: &Polynomial) -> bool {
        // Coefficients equal to p must not count toward the degree.
        let poly = Polynomial::new(self.reduced(poly.coefficients()));
        match poly.degree() {
            Some(degree) if degree > 2 * self.par.degree() => false,
            _ => self.evaluate_on_secrets(&poly).iter().all(|v| *v == 0),
        }
    }

    /// Returns the monic polynomial of degree `num_secrets` vanishing at the
    /// secret points.
    pub fn vanishing_polynomial(&self) -> &Polynomial {
        self.vanishing.get_or_init(|| {
            log::debug!(
                "Building the vanishing polynomial on {} secret points",
                self.par.num_secrets()
            );
            Polynomial::from_roots(&self.par.modulus, self.par.secret_points())
        })
    }

    fn check_length(found: usize, expected: usize) -> Result<()> {
        if found != expected {
            Err(Error::InvalidLength { expected, found })
        } else {
            Ok(())
        }
    }

    fn reduced(&self, values: &[u64]) -> Vec<u64> {
        values.iter().map(|v| self.par.modulus.reduce(*v)).collect()
    }

    fn sharing_from_image(&self, image: Vec<u64>) -> Sharing {
        let poly = self.interpolate_on_secrets(&self.par.op_single, image);
        let shares = self.poly_to_shares(&poly);
        Sharing { shares, poly }
    }

    /// Returns the polynomial of degree smaller than `op.size()` whose
    /// evaluation at the i-th point `root^(1 + rev(i))` is `image[i]`. The
    /// first `num_secrets` of these points are the secret points.
    fn interpolate_on_secrets(&self, op: &NttOperator, mut image: Vec<u64>) -> Polynomial {
        debug_assert_eq!(image.len(), op.size());

        op.backward(&mut image);
        self.par.table.untwist(&mut image);
        Polynomial::new(image)
    }

    fn evaluate_on_secrets(&self, poly: &Polynomial) -> Vec<u64> {
        let op = match poly.degree() {
            Some(degree) if degree > self.par.degree() => &self.par.op_double,
            _ => &self.par.op_single,
        };

        // Evaluating a(root * x) at the points of the transform.
        let mut twisted = Zeroizing::new(self.reduced(poly.coefficients()));
        self.par.table.twist(&mut twisted);
        let mut evaluations = self.fold(&twisted, op.size());
        op.forward(&mut evaluations);
        evaluations[..self.par.num_secrets()].to_vec()
    }

    fn poly_to_shares(&self, poly: &Polynomial) -> Vec<u64> {
        let op = &self.par.op_shares;
        let coefficients = Zeroizing::new(self.reduced(poly.coefficients()));
        let mut evaluations = self.fold(&coefficients, op.size());
        op.forward(&mut evaluations);

        // Shares past order / 2 are read after the positions of the secrets.
        let half = self.par.order() / 2;
        let num_shares = self.par.num_shares();
        if num_shares > half {
            let num_secrets = self.par.num_secrets();
            evaluations.copy_within(half + num_secrets..num_shares + num_secrets, half);
        }
        evaluations[..num_shares].to_vec()
    }

    /// Reduces reduced coefficients modulo `x^n - 1`, which preserves the
    /// evaluations at the n-th roots of unity.
    fn fold(&self, coefficients: &[u64], n: usize) -> Zeroizing<Vec<u64>> {
        let q = &self.par.modulus;
        let mut folded = Zeroizing::new(vec![0u64; n]);
        for chunk in coefficients.chunks(n) {
            izip!(folded.iter_mut(), chunk).for_each(|(f, c)| *f = q.add(*f, *c));
        }
        folded
    }

    /// With exactly `2 * degree + 1` shares, the last sample of the
    /// interpolation is missing: choose it so that the leading coefficient
    /// cancels, which leaves the unique polynomial of degree at most
    /// `2 * degree` through the shares.
    fn complete_last_sample(&self, coefficients: &mut [u64]) -> Result<()> {
        let q = &self.par.modulus;
        let op = &self.par.op_double;
        let last = op.size() - 1;

        let mut basis = vec![0u64; op.size()];
        basis[last] = 1;
        op.backward(&mut basis);

        let top_inv = q
            .inv(basis[last])
            .ok_or_else(|| Error::DefaultError("Singular interpolation basis".to_string()))?;
        let scale = q.neg(q.mul(coefficients[last], top_inv));
        izip!(coefficients.iter_mut(), &basis).for_each(|(c, b)| *c = q.add(*c, q.mul(scale, *b)));
        Ok(())
    }

    fn verify(
        &self,
        poly: &Polynomial,
        shares: &[u64],
        max_degree: usize,
    ) -> std::result::Result<(), VerificationError> {
        if let Some(degree) = poly.degree() {
            if degree > max_degree {
                return Err(VerificationError::DegreeTooLarge { degree, max_degree });
            }
        }

        let q = &self.par.modulus;
        let recomputed = self.poly_to_shares(poly);
        for (index, (share, expected)) in izip!(shares, &recomputed)
            .enumerate()
            .skip(self.par.op_double.size())
        {
            if q.reduce(*share) != *expected {
                return Err(VerificationError::InconsistentShare(index));
            }
        }
        Ok(())
    }

    /// Lowers the degree to at most `2 * degree` by subtracting multiples of
    /// the vanishing polynomial, which leaves the secret evaluations unchanged.
    fn reduce_degree(&self, poly: &mut Polynomial) {
        let vanishing = self.vanishing_polynomial();
        let max_degree = 2 * self.par.degree();
        while let (Some(degree), Some(lc)) = (poly.degree(), poly.leading_coefficient()) {
            if degree <= max_degree {
                break;
            }
            poly.sub_scaled_shifted(
                &self.par.modulus,
                lc,
                degree - self.par.num_secrets(),
                vanishing,
            );
        }
    }

    fn select_outputs(&self, poly: Polynomial, outputs: Outputs) -> RandomPoly {
        RandomPoly {
            secrets: outputs.secrets.then(|| self.evaluate_on_secrets(&poly)),
            shares: outputs.shares.then(|| self.poly_to_shares(&poly)),
            poly: outputs.poly.then_some(poly),
        }
    }
}

impl SecretSharer for PackedSecretSharing {
    fn generate_secret_shares<R: RngCore + CryptoRng>(
        &self,
        secrets: &[u64],
        rng: &mut R,
    ) -> Result<Vec<u64>> {
        Ok(self.share(secrets, rng)?.shares)
    }

    fn reconstruct_secrets(&self, shares: &[u64]) -> Result<Vec<u64>> {
        Ok(self.reconstruct(shares, ShareCheck::Skip)?.secrets)
    }
}
