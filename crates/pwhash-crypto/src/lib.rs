pub mod credential;
pub mod digest;
pub mod eq;
pub mod error;
pub mod kdf;
pub mod password;
pub mod salt;

pub use credential::Credential;
pub use digest::Digest;
pub use error::Error;
pub use password::{
    compare_password,
    compare_password_async,
    hash_password,
    hash_password_async,
    DerivationParams,
    Options,
};
pub use salt::{generate_salt, DEFAULT_SALT_LENGTH};
