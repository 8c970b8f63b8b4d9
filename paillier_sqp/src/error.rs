//! Error type shared by every module of the crate.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PaillierError>;

#[derive(Debug, thiserror::Error)]
pub enum PaillierError {
    /// A randomized search ran out of its retry budget.
    #[error("no suitable {bits}-bit value found after {attempts} attempts")]
    Generation { bits: u64, attempts: usize },

    /// `gcd(a, n) != 1`. Key generation recovers from this by resampling.
    #[error("value has no multiplicative inverse for the given modulus")]
    NoInverse,

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("secure comparison aborted: {0}")]
    Protocol(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration")]
    ConfigParse(#[from] toml::de::Error),
}
