#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unsupported digest: {0}")]
    UnsupportedDigest(String),

    #[error("key derivation failed: {0}")]
    DerivationFailure(String),
}
