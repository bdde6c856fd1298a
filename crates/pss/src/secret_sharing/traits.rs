//! Traits for secret sharing operations.
//!
//! This module defines the core traits for sharing a vector of secrets and
//! recovering it from shares.
use crate::Result;
use rand::{CryptoRng, RngCore};

/// Trait for generating secret shares and reconstructing secrets.
pub trait SecretSharer {
    /// Generate shares for a vector of secrets.
    fn generate_secret_shares<R: RngCore + CryptoRng>(
        &self,
        secrets: &[u64],
        rng: &mut R,
    ) -> Result<Vec<u64>>;

    /// Reconstruct a vector of secrets from shares.
    fn reconstruct_secrets(&self, shares: &[u64]) -> Result<Vec<u64>>;
}
