use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pwhash_crypto::Options;
use pwhash_fs::fs::FileReadExt;
use secstr::SecUtf8;

#[derive(Parser, Debug)]
#[command(name = "pwhash", version, about = "Derive and verify PBKDF2 password hashes")]
pub struct Cli {
    /// Configuration file, defaults to config/pwhash.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a random hex salt
    Salt {
        /// Salt length in bytes
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// Derive a key and print the credential record
    Hash(HashArgs),
    /// Compare a password against a derived key
    Compare(CompareArgs),
    /// Compare a password against a stored credential record
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
pub struct HashArgs {
    #[command(flatten)]
    pub password: PasswordArgs,

    /// Salt text, generated when absent
    #[arg(long, conflicts_with = "salt_length")]
    pub salt: Option<String>,

    /// Length in bytes of the generated salt
    #[arg(long)]
    pub salt_length: Option<usize>,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Print only the derived key
    #[arg(long)]
    pub hash_only: bool,

    /// Write the credential record to this file instead of stdout
    #[arg(short, long, conflicts_with = "hash_only")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub password: PasswordArgs,

    /// Stored derived key, in hex
    #[arg(long)]
    pub hash: String,

    /// Salt used when the key was derived
    #[arg(long)]
    pub salt: String,

    #[command(flatten)]
    pub options: OptionArgs,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub password: PasswordArgs,

    /// Credential record, defaults to credential.toml
    #[arg(short, long)]
    pub record: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// PBKDF2 iteration count
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Derived key length in bytes
    #[arg(long)]
    pub keylen: Option<usize>,

    /// Digest driving the HMAC, e.g. sha256 or sha512
    #[arg(long)]
    pub digest: Option<String>,
}

impl OptionArgs {
    #[must_use]
    pub fn resolve(&self, defaults: &Options) -> Options {
        Options {
            iterations: self.iterations.unwrap_or(defaults.iterations),
            keylen: self.keylen.unwrap_or(defaults.keylen),
            digest: self
                .digest
                .clone()
                .unwrap_or_else(|| defaults.digest.clone()),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct PasswordArgs {
    /// Password to derive from
    #[arg(long, env = "PWHASH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Read the password from the first line of this file, takes precedence over --password
    #[arg(long)]
    pub password_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("no password given, use --password, --password-file or PWHASH_PASSWORD")]
    Missing,

    #[error("failed to read password file: {0}")]
    Read(#[from] tokio::io::Error),
}

impl PasswordArgs {
    /// Resolves the password from the file, the flag or the environment, in that order.
    ///
    /// # Errors
    /// If no source is given or the password file cannot be read.
    pub async fn resolve(self) -> Result<SecUtf8, PasswordError> {
        if let Some(path) = self.password_file {
            return Ok(SecUtf8::from(path.read_first_line().await?));
        }

        self.password.map(SecUtf8::from).ok_or(PasswordError::Missing)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hash() {
        let cli = Cli::try_parse_from([
            "pwhash",
            "hash",
            "--password",
            "correct horse",
            "--salt",
            "deadbeef",
            "--iterations",
            "1000",
            "--digest",
            "sha256",
            "--hash-only",
        ])
        .unwrap();

        let Command::Hash(args) = cli.command else {
            panic!("expected hash command");
        };
        assert_eq!(args.salt.as_deref(), Some("deadbeef"));
        assert!(args.hash_only);

        let options = args.options.resolve(&Options::default());
        assert_eq!(options.iterations, 1000);
        assert_eq!(options.keylen, 64);
        assert_eq!(options.digest, "sha256");
    }

    #[test]
    fn test_salt_conflicts() {
        let cli = Cli::try_parse_from([
            "pwhash",
            "hash",
            "--salt",
            "deadbeef",
            "--salt-length",
            "8",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_compare_requires_hash() {
        let cli = Cli::try_parse_from(["pwhash", "compare", "--salt", "deadbeef"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_global_config() {
        let cli = Cli::try_parse_from(["pwhash", "salt", "--config", "other.toml", "-l", "8"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
        assert!(matches!(cli.command, Command::Salt { length: Some(8) }));
    }

    #[tokio::test]
    async fn test_password_missing() {
        let args = PasswordArgs::default();
        assert!(matches!(args.resolve().await, Err(PasswordError::Missing)));
    }

    #[tokio::test]
    async fn test_password_file_precedence() {
        let path = std::env::temp_dir().join(format!("pwhash-cli-pw-{}", std::process::id()));
        tokio::fs::write(&path, "from file\n").await.unwrap();

        let args = PasswordArgs {
            password: Some("from flag".to_string()),
            password_file: Some(path.clone()),
        };
        assert_eq!(args.resolve().await.unwrap().unsecure(), "from file");

        tokio::fs::remove_file(path).await.unwrap();
    }
}
