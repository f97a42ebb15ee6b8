use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use super::Kdf;
use crate::{digest::Digest, error::Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbkdf2Params {
    pub salt: Vec<u8>,
    pub iterations: u32,
    pub digest: Digest,
}

/// PBKDF2 keyed with HMAC over one of the supported [`Digest`]s.
#[derive(Debug, Clone)]
pub struct Pbkdf2 {
    params: Pbkdf2Params,
}

impl Pbkdf2 {
    #[must_use]
    pub fn params(&self) -> &Pbkdf2Params {
        &self.params
    }
}

impl Kdf for Pbkdf2 {
    const NAME: &'static str = "pbkdf2";

    type Error = Error;
    type Params = Pbkdf2Params;

    fn new(params: Self::Params) -> Self {
        Self { params }
    }

    fn check_output_len(&self, len: usize) -> Result<(), Self::Error> {
        if self.params.iterations == 0 {
            return Err(Error::InvalidParameter("iterations must be at least 1".into()));
        }
        if len == 0 {
            return Err(Error::InvalidParameter("keylen must be at least 1".into()));
        }

        let max = self.params.digest.max_key_len();
        if len as u64 > max {
            return Err(Error::DerivationFailure(format!(
                "keylen {len} exceeds the {max} byte limit of {}",
                self.params.digest
            )));
        }

        Ok(())
    }

    fn derive_key(&self, password: &[u8], out: &mut [u8]) -> Result<(), Self::Error> {
        self.check_output_len(out.len())?;

        let Pbkdf2Params {
            salt,
            iterations,
            digest,
        } = &self.params;
        let (salt, rounds) = (salt.as_slice(), *iterations);

        match digest {
            Digest::Sha1 => pbkdf2::<Hmac<Sha1>>(password, salt, rounds, out),
            Digest::Sha224 => pbkdf2::<Hmac<Sha224>>(password, salt, rounds, out),
            Digest::Sha256 => pbkdf2::<Hmac<Sha256>>(password, salt, rounds, out),
            Digest::Sha384 => pbkdf2::<Hmac<Sha384>>(password, salt, rounds, out),
            Digest::Sha512 => pbkdf2::<Hmac<Sha512>>(password, salt, rounds, out),
            Digest::Sha512_224 => pbkdf2::<Hmac<Sha512_224>>(password, salt, rounds, out),
            Digest::Sha512_256 => pbkdf2::<Hmac<Sha512_256>>(password, salt, rounds, out),
            Digest::Sha3_224 => pbkdf2::<Hmac<Sha3_224>>(password, salt, rounds, out),
            Digest::Sha3_256 => pbkdf2::<Hmac<Sha3_256>>(password, salt, rounds, out),
            Digest::Sha3_384 => pbkdf2::<Hmac<Sha3_384>>(password, salt, rounds, out),
            Digest::Sha3_512 => pbkdf2::<Hmac<Sha3_512>>(password, salt, rounds, out),
        }
        .map_err(|e| Error::DerivationFailure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use const_hex::ToHexExt;

    use super::*;

    fn derive(digest: Digest, password: &str, salt: &str, iterations: u32, len: usize) -> String {
        let kdf = Pbkdf2::new(Pbkdf2Params {
            salt: salt.as_bytes().to_vec(),
            iterations,
            digest,
        });
        let mut out = vec![0u8; len];
        kdf.derive_key(password.as_bytes(), &mut out).unwrap();
        out.encode_hex()
    }

    #[test]
    fn test_sha1_vectors() {
        // RFC 6070
        assert_eq!(
            derive(Digest::Sha1, "password", "salt", 1, 20),
            "0c60c80f961f0e71f3a9b524af6012062fe037a6"
        );
        assert_eq!(
            derive(Digest::Sha1, "password", "salt", 4096, 20),
            "4b007901b765489abead49d926f721d065a429c1"
        );
    }

    #[test]
    fn test_sha256_vectors() {
        assert_eq!(
            derive(Digest::Sha256, "password", "salt", 1, 20),
            "120fb6cffcf8b32c43e7225256c4f837a86548c9"
        );
        assert_eq!(
            derive(Digest::Sha256, "password", "salt", 4096, 20),
            "c5e478d59288c841aa530db6845c4c8d962893a0"
        );
        assert_eq!(
            derive(Digest::Sha256, "pass\0word", "sa\0lt", 4096, 16),
            "89b69d0516f829893c696226650a8687"
        );
    }

    #[test]
    fn test_sha512_vector() {
        assert_eq!(
            derive(Digest::Sha512, "password", "salt", 1, 64),
            "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252\
             c02d470a285a0501bad999bfe943c08f050235d7d68b1da55e63f73b60a57fce"
        );
    }

    #[test]
    fn test_sha384_and_sha3_vectors() {
        assert_eq!(
            derive(Digest::Sha384, "password", "salt", 1, 48),
            "c0e14f06e49e32d73f9f52ddf1d0c5c7191609233631dadd\
             76a567db42b78676b38fc800cc53ddb642f5c74442e62be4"
        );
        assert_eq!(
            derive(Digest::Sha3_256, "password", "salt", 1, 32),
            "94613f3ee2ea730e0b06754f3fc816d4f87c9be9cbd8556b5d59b52330e333a8"
        );
    }

    #[test]
    fn test_zero_iterations() {
        let kdf = Pbkdf2::new(Pbkdf2Params {
            salt: b"salt".to_vec(),
            iterations: 0,
            digest: Digest::Sha256,
        });
        let mut out = [0u8; 32];
        assert!(matches!(
            kdf.derive_key(b"password", &mut out),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_empty_output() {
        let kdf = Pbkdf2::new(Pbkdf2Params {
            salt: b"salt".to_vec(),
            iterations: 1,
            digest: Digest::Sha256,
        });
        assert!(matches!(
            kdf.derive_key(b"password", &mut []),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_output_bound() {
        let kdf = Pbkdf2::new(Pbkdf2Params {
            salt: b"salt".to_vec(),
            iterations: 1,
            digest: Digest::Sha1,
        });
        let max = usize::try_from(Digest::Sha1.max_key_len()).unwrap();
        assert!(kdf.check_output_len(max).is_ok());
        assert!(matches!(
            kdf.check_output_len(max + 1),
            Err(Error::DerivationFailure(_))
        ));
    }
}
