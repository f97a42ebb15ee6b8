use std::str::FromStr;

use crate::error::Error;

/// Hash functions that can drive the HMAC inside PBKDF2.
///
/// Names parse case-insensitively and display in their canonical lowercase form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Digest {
    #[strum(serialize = "sha1")]
    Sha1,
    #[strum(serialize = "sha224")]
    Sha224,
    #[strum(serialize = "sha256")]
    Sha256,
    #[strum(serialize = "sha384")]
    Sha384,
    #[default]
    #[strum(serialize = "sha512")]
    Sha512,
    #[strum(serialize = "sha512-224")]
    Sha512_224,
    #[strum(serialize = "sha512-256")]
    Sha512_256,
    #[strum(serialize = "sha3-224")]
    Sha3_224,
    #[strum(serialize = "sha3-256")]
    Sha3_256,
    #[strum(serialize = "sha3-384")]
    Sha3_384,
    #[strum(serialize = "sha3-512")]
    Sha3_512,
}

impl Digest {
    /// Resolves a digest by name.
    ///
    /// # Errors
    /// If the name is not a supported digest, an `Error::UnsupportedDigest` is returned.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        Self::from_str(name.trim()).map_err(|_| Error::UnsupportedDigest(name.to_string()))
    }

    /// Output size of the digest in bytes.
    #[must_use]
    pub const fn output_size(self) -> usize {
        match self {
            Digest::Sha1 => 20,
            Digest::Sha224 | Digest::Sha512_224 | Digest::Sha3_224 => 28,
            Digest::Sha256 | Digest::Sha512_256 | Digest::Sha3_256 => 32,
            Digest::Sha384 | Digest::Sha3_384 => 48,
            Digest::Sha512 | Digest::Sha3_512 => 64,
        }
    }

    /// Longest key PBKDF2 can derive with this digest: `hLen * (2^32 - 1)` bytes.
    #[must_use]
    pub const fn max_key_len(self) -> u64 {
        self.output_size() as u64 * u32::MAX as u64
    }
}
