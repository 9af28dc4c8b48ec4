use thiserror::Error;

/// Errors surfaced by the FAS stack.
///
/// Protocol checks (pre-verification, aux verification, signature
/// verification) report failure as `false`, not through this type.
#[derive(Debug, Error)]
pub enum FasError {
    /// A vector argument does not have the length the operation declares.
    #[error("{what} must have length {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Bytes could not be parsed as a point, scalar or signature.
    #[error("decoding failed: {0}")]
    Decode(&'static str),

    /// The discrete log of the decrypted point is not in `[0, bound)`.
    #[error("no discrete log found in [0, {bound})")]
    NotFoundInBound { bound: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Secret key is zero.
    #[error("secret key must be non-zero")]
    InvalidSecretKey,

    /// Nonce derivation produced zero or the nonce point is the identity.
    #[error("nonce derivation produced a degenerate value")]
    DegenerateNonce,
}

impl FasError {
    /// True when decryption ran but the value lies outside the search bound.
    /// Callers may retry with a larger bound.
    pub fn is_out_of_bound(&self) -> bool {
        matches!(self, FasError::NotFoundInBound { .. })
    }
}

pub type Result<T> = std::result::Result<T, FasError>;
