use std::path::PathBuf;

use garde::Validate;
use pwhash_crypto::{Options, DEFAULT_SALT_LENGTH};
use pwhash_fs::{
    toml::{Error, FromToml},
    DefaultPathProvider,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Validate, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[garde(dive)]
    pub defaults: Defaults,
    #[garde(dive)]
    pub telemetry: pwhash_telemetry::config::Config,
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl DefaultPathProvider for Config {
    const DEFAULT_FILENAME: &'static str = "config/pwhash.toml";
}

impl Config {
    /// Loads the configuration from `path`, or from the default path when none is given.
    /// A missing default file falls back to the built-in defaults.
    ///
    /// # Errors
    /// If an explicitly given file cannot be read, or any file fails to parse.
    pub async fn load(path: Option<PathBuf>) -> Result<Self, Error> {
        let explicit = path.is_some();

        match Self::from_toml_path(path).await {
            Ok((config, _)) => Ok(config),
            Err(Error::FileNotFound(path)) if !explicit => {
                warn!(file = %path.display(), "config not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// Derivation defaults applied when the matching command line flag is absent.
#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    #[garde(dive)]
    #[serde(flatten)]
    pub options: Options,
    #[garde(skip)]
    pub salt_length: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            options: Options::default(),
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let config: Config = toml::from_str(
            r#"
            [defaults]
            iterations = 210000
            digest = "sha256"
            salt_length = 32

            [telemetry]
            level = "info"
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.options.iterations, 210_000);
        assert_eq!(config.defaults.options.keylen, 64);
        assert_eq!(config.defaults.options.digest, "sha256");
        assert_eq!(config.defaults.salt_length, 32);
        assert_eq!(config.telemetry.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_unsupported_digest() {
        let config: Config = toml::from_str(
            r#"
            [defaults]
            digest = "md5"
            "#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_load_missing_default() {
        // Tests run from the crate directory, which has no config/ folder.
        let config = Config::load(None).await.unwrap();
        assert_eq!(config.defaults.options, Options::default());
    }

    #[tokio::test]
    async fn test_load_missing_explicit() {
        let config = Config::load(Some(PathBuf::from("missing/pwhash.toml"))).await;
        assert!(matches!(config, Err(Error::FileNotFound(_))));
    }
}
