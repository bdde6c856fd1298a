//! Secret sharing abstractions and implementations.
//!
//! This module provides the packed secret sharing engine, which shares and
//! reconstructs many secrets at once with number-theoretic transforms.

/// Packed secret sharing engine.
pub mod packed;
/// Traits for secret sharing operations.
pub mod traits;

pub use packed::{Outputs, PackedSecretSharing, RandomPoly, Reconstruction, ShareCheck, Sharing};
pub use traits::SecretSharer;
