#![crate_name = "pss"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Packed (ramp) secret sharing over prime fields.
//!
//! Many secrets are encoded into the evaluations of a single low-degree
//! polynomial, and shares are produced and reconstructed with
//! number-theoretic transforms in `O(n log n)` field operations.

mod errors;
mod parameters;
mod poly;

pub mod secret_sharing;

pub use errors::{Error, ParametersError, Result, VerificationError};
pub use parameters::{PssParameters, PssParametersBuilder, MIN_BLOCK_LEN};
pub use poly::Polynomial;
pub use secret_sharing::{
    Outputs, PackedSecretSharing, RandomPoly, Reconstruction, SecretSharer, ShareCheck, Sharing,
};
