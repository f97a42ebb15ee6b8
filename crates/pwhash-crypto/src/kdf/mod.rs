pub mod pbkdf2;

pub use self::pbkdf2::{Pbkdf2, Pbkdf2Params};

pub trait Kdf: Sized {
    const NAME: &'static str;

    type Error: std::error::Error;
    type Params;

    fn new(params: Self::Params) -> Self;

    /// Checks that a key of `len` bytes can be derived with the current parameters.
    ///
    /// # Errors
    /// If the parameters or the requested length are rejected by the KDF.
    fn check_output_len(&self, len: usize) -> Result<(), Self::Error>;

    /// Derives a key from the given password into `out`, filling it entirely.
    ///
    /// # Errors
    /// If the key derivation fails on invalid parameters or output length.
    fn derive_key(&self, password: &[u8], out: &mut [u8]) -> Result<(), Self::Error>;
}
