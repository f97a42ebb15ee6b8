use garde::Validate;
use secstr::{SecUtf8, SecVec};
use serde::{Deserialize, Serialize};

use crate::{
    digest::Digest,
    eq::ConstantTimeEq,
    error::Error,
    kdf::{Kdf, Pbkdf2, Pbkdf2Params},
};

pub const DEFAULT_ITERATIONS: u32 = 100_000;
pub const DEFAULT_KEYLEN: usize = 64;
pub const DEFAULT_DIGEST: &str = "sha512";

/// Tunable derivation parameters, every field falling back to its default when absent.
#[derive(Validate, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    #[garde(range(min = 1))]
    pub iterations: u32,
    #[garde(range(min = 1))]
    pub keylen: usize,
    #[garde(custom(supported_digest))]
    pub digest: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            keylen: DEFAULT_KEYLEN,
            digest: DEFAULT_DIGEST.to_string(),
        }
    }
}

impl std::fmt::Display for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ iterations: {}, keylen: {}, digest: {} }}",
            self.iterations, self.keylen, self.digest
        )
    }
}

#[allow(clippy::ptr_arg)]
fn supported_digest(value: &String, (): &()) -> garde::Result {
    Digest::from_name(value)
        .map(|_| ())
        .map_err(|e| garde::Error::new(e.to_string()))
}

/// Everything needed to reproduce a key derivation.
#[derive(Debug, Clone)]
pub struct DerivationParams {
    pub password: SecUtf8,
    pub salt: String,
    pub options: Options,
}

impl DerivationParams {
    #[must_use]
    pub fn new(password: impl Into<SecUtf8>, salt: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            salt: salt.into(),
            options: Options::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.options.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_keylen(mut self, keylen: usize) -> Self {
        self.options.keylen = keylen;
        self
    }

    #[must_use]
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.options.digest = digest.into();
        self
    }
}

/// Derives a key from the password and salt and returns it as lowercase hex of `2 * keylen` characters.
///
/// The salt text is used as-is, it is not hex-decoded.
///
/// # Errors
/// - `Error::UnsupportedDigest` if the digest name is unknown.
/// - `Error::InvalidParameter` if `iterations` or `keylen` is zero.
/// - `Error::DerivationFailure` if `keylen` is beyond what PBKDF2 can produce with the digest.
#[tracing::instrument(
    skip_all,
    fields(
        iterations = params.options.iterations,
        keylen = params.options.keylen,
        digest = %params.options.digest,
        salt_len = params.salt.len(),
    )
)]
pub fn hash_password(params: &DerivationParams) -> Result<String, Error> {
    let digest = Digest::from_name(&params.options.digest)?;

    let kdf = Pbkdf2::new(Pbkdf2Params {
        salt: params.salt.as_bytes().to_vec(),
        iterations: params.options.iterations,
        digest,
    });
    kdf.check_output_len(params.options.keylen)?;

    let mut key = SecVec::new(vec![0u8; params.options.keylen]);
    kdf.derive_key(params.password.unsecure().as_bytes(), key.unsecure_mut())?;

    tracing::debug!(kdf = Pbkdf2::NAME, "derived key");
    Ok(const_hex::encode(key.unsecure()))
}

/// Re-derives a key from the candidate password and compares it against `hash` in constant time.
///
/// # Errors
/// Any error of [`hash_password`], unchanged.
pub fn compare_password(params: &DerivationParams, hash: &str) -> Result<bool, Error> {
    let derived = SecUtf8::from(hash_password(params)?);
    let matches = ConstantTimeEq::eq(&derived.unsecure(), &hash);

    tracing::debug!(matches, "compared password");
    Ok(matches)
}

/// [`hash_password`] on the blocking thread pool, leaving async workers free.
///
/// # Errors
/// Any error of [`hash_password`], or `Error::DerivationFailure` if the blocking task failed.
pub async fn hash_password_async(params: DerivationParams) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || hash_password(&params))
        .await
        .map_err(|e| Error::DerivationFailure(format!("derivation task failed: {e}")))?
}

/// [`compare_password`] on the blocking thread pool, leaving async workers free.
///
/// # Errors
/// Any error of [`compare_password`], or `Error::DerivationFailure` if the blocking task failed.
pub async fn compare_password_async(params: DerivationParams, hash: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || compare_password(&params, &hash))
        .await
        .map_err(|e| Error::DerivationFailure(format!("derivation task failed: {e}")))?
}
