use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates that an error from the underlying mathematical library was
    /// encountered.
    #[error("{0}")]
    MathError(#[from] pss_math::Error),

    /// Indicates that the parameters are not consistent.
    #[error("{0}")]
    ParametersError(ParametersError),

    /// Indicates an input vector of the wrong length.
    #[error("Invalid length: expected {expected}, found {found}")]
    InvalidLength {
        /// The length required by the parameters.
        expected: usize,
        /// The length that was provided.
        found: usize,
    },

    /// Indicates that the supplied shares failed verification.
    #[error("{0}")]
    VerificationError(VerificationError),

    /// Indicates a default error
    #[error("{0}")]
    DefaultError(String),
}

/// Separate enum to indicate parameters-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParametersError {
    /// Indicates that `degree + 1` is not a power of two.
    #[error("Invalid degree: {0} + 1 is not a power of two")]
    InvalidDegree(usize),

    /// Indicates that `degree + 1` is not a multiple of the block length.
    #[error("Invalid degree: {0} + 1 is not a multiple of {1}")]
    DegreeNotBlockAligned(usize, usize),

    /// Indicates an unsupported number of secrets.
    #[error("Invalid number of secrets: {0} is not between 1 and {1}")]
    InvalidNumSecrets(usize, usize),

    /// Indicates that too few shares are produced to reconstruct.
    #[error("Too few shares: {0} < {1}")]
    TooFewShares(usize, usize),

    /// Indicates that the shares and the secrets do not fit in the domain.
    #[error("Too many shares: {0} shares and {1} secrets exceed the domain order {2}")]
    TooManyShares(usize, usize, usize),

    /// Indicates that the modulus is invalid.
    #[error("Invalid prime: {0}")]
    InvalidPrime(String),

    /// Indicates that the root of unity is invalid.
    #[error("Invalid root: {0}")]
    InvalidRoot(String),

    /// Indicates that the evaluation domain is too small for the degree.
    #[error("Domain too small: order {0} / 2 < {1}")]
    DomainTooSmall(usize, usize),
}

/// Separate enum to indicate that shares are not consistent with a single
/// low-degree polynomial.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// Indicates that the interpolated polynomial has too large a degree.
    #[error("Degree too large: {degree} > {max_degree}")]
    DegreeTooLarge {
        /// Degree of the interpolated polynomial.
        degree: usize,
        /// Largest accepted degree.
        max_degree: usize,
    },

    /// Indicates a share that disagrees with the interpolated polynomial.
    #[error("Inconsistent share at index {0}")]
    InconsistentShare(usize),
}
