use secstr::SecUtf8;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    password::{
        compare_password,
        compare_password_async,
        hash_password,
        hash_password_async,
        DerivationParams,
        Options,
    },
    salt::generate_salt,
};

/// What a caller has to persist to verify a password later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub salt: String,
    pub iterations: u32,
    pub keylen: usize,
    pub digest: String,
    pub hash: String,
}

impl Credential {
    /// Generates a fresh salt of `salt_length` bytes and derives the key for `password`.
    ///
    /// # Errors
    /// If salt generation or key derivation fails.
    pub fn create(password: &SecUtf8, options: Options, salt_length: usize) -> Result<Self, Error> {
        let params = Self::fresh_params(password, options, salt_length)?;
        let hash = hash_password(&params)?;
        Ok(Self::from_params(params, hash))
    }

    /// Same as [`Credential::create`] with the derivation on the blocking pool.
    ///
    /// # Errors
    /// If salt generation or key derivation fails.
    pub async fn create_async(
        password: &SecUtf8,
        options: Options,
        salt_length: usize,
    ) -> Result<Self, Error> {
        let params = Self::fresh_params(password, options, salt_length)?;
        let hash = hash_password_async(params.clone()).await?;
        Ok(Self::from_params(params, hash))
    }

    /// Checks `password` against the recorded key.
    ///
    /// # Errors
    /// If the recorded parameters are rejected by the derivation.
    pub fn verify(&self, password: &SecUtf8) -> Result<bool, Error> {
        compare_password(&self.params(password), &self.hash)
    }

    /// Same as [`Credential::verify`] with the derivation on the blocking pool.
    ///
    /// # Errors
    /// If the recorded parameters are rejected by the derivation.
    pub async fn verify_async(&self, password: &SecUtf8) -> Result<bool, Error> {
        compare_password_async(self.params(password), self.hash.clone()).await
    }

    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            iterations: self.iterations,
            keylen: self.keylen,
            digest: self.digest.clone(),
        }
    }

    fn params(&self, password: &SecUtf8) -> DerivationParams {
        DerivationParams::new(password.clone(), self.salt.clone()).with_options(self.options())
    }

    fn fresh_params(
        password: &SecUtf8,
        options: Options,
        salt_length: usize,
    ) -> Result<DerivationParams, Error> {
        let salt = generate_salt(salt_length)?;
        Ok(DerivationParams::new(password.clone(), salt).with_options(options))
    }

    fn from_params(params: DerivationParams, hash: String) -> Self {
        let DerivationParams { salt, options, .. } = params;
        Self {
            salt,
            iterations: options.iterations,
            keylen: options.keylen,
            digest: options.digest,
            hash,
        }
    }
}
