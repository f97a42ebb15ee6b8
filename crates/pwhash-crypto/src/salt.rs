use const_hex::ToHexExt;
use rand::{rngs::OsRng, TryRngCore};

use crate::error::Error;

/// Salt length in bytes used when the caller does not pick one.
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// Generates `length` random bytes from the operating system and returns them as lowercase hex.
///
/// A zero length yields an empty string.
///
/// # Errors
/// If the OS random source fails, an `Error::RandomSourceUnavailable` is returned.
#[tracing::instrument(level = "debug")]
pub fn generate_salt(length: usize) -> Result<String, Error> {
    let mut salt = vec![0u8; length];
    fill_random(&mut salt)?;
    Ok(salt.encode_hex())
}

fn fill_random(dest: &mut [u8]) -> Result<(), Error> {
    OsRng
        .try_fill_bytes(dest)
        .map_err(|e| Error::RandomSourceUnavailable(e.to_string()))
}
