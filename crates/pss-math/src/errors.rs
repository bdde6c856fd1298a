use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates an invalid modulus
    #[error("Invalid modulus: modulus {0} should be between 2 and (1 << 62) - 1.")]
    InvalidModulus(u64),

    /// Indicates a root of unity whose order cannot index a transform domain.
    #[error("Invalid root of unity: {0}")]
    InvalidRoot(String),

    /// Indicates a transform size that the domain cannot provide.
    #[error("Invalid transform size {0}: must be a power of two dividing the order {1}")]
    InvalidSize(usize, usize),

    /// Indicates an error that is not covered by the other variants.
    #[error("{0}")]
    Default(String),
}
