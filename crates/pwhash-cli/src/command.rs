use std::path::PathBuf;

use color_eyre::Result;
use pwhash_crypto::{
    compare_password_async,
    generate_salt,
    hash_password_async,
    Credential,
    DerivationParams,
};
use pwhash_fs::{
    toml::{FromToml, ToToml},
    DefaultPathProvider,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    cli::{Command, CompareArgs, HashArgs, VerifyArgs},
    config::Config,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Match,
    Mismatch,
}

/// A [`Credential`] stored as its own TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialFile(pub Credential);

impl DefaultPathProvider for CredentialFile {
    const DEFAULT_FILENAME: &'static str = "credential.toml";
}

/// Runs a command, writing its result to `out`.
///
/// # Errors
/// If the password cannot be resolved, a file cannot be read or written, or the derivation fails.
pub async fn run(
    command: Command,
    config: &Config,
    out: &mut impl std::io::Write,
) -> Result<Outcome> {
    match command {
        Command::Salt { length } => {
            let salt = generate_salt(length.unwrap_or(config.defaults.salt_length))?;
            writeln!(out, "{salt}")?;
            Ok(Outcome::Done)
        }
        Command::Hash(args) => hash(args, config, out).await,
        Command::Compare(args) => compare(args, config, out).await,
        Command::Verify(args) => verify(args, out).await,
    }
}

async fn hash(args: HashArgs, config: &Config, out: &mut impl std::io::Write) -> Result<Outcome> {
    let options = args.options.resolve(&config.defaults.options);
    let password = args.password.resolve().await?;

    let salt = match args.salt {
        Some(salt) => salt,
        None => generate_salt(args.salt_length.unwrap_or(config.defaults.salt_length))?,
    };

    let params = DerivationParams::new(password, salt).with_options(options);
    let hash = hash_password_async(params.clone()).await?;

    if args.hash_only {
        writeln!(out, "{hash}")?;
        return Ok(Outcome::Done);
    }

    let record = CredentialFile(Credential {
        salt: params.salt,
        iterations: params.options.iterations,
        keylen: params.options.keylen,
        digest: params.options.digest,
        hash,
    });

    match args.out {
        Some(path) => {
            let path = record.to_toml_path(Some(path)).await?;
            info!(file = %path.display(), "wrote credential");
        }
        None => write!(out, "{}", toml::to_string(&record)?)?,
    }

    Ok(Outcome::Done)
}

async fn compare(
    args: CompareArgs,
    config: &Config,
    out: &mut impl std::io::Write,
) -> Result<Outcome> {
    let options = args.options.resolve(&config.defaults.options);
    let password = args.password.resolve().await?;

    let params = DerivationParams::new(password, args.salt).with_options(options);
    let matches = compare_password_async(params, args.hash).await?;

    report(matches, out)
}

async fn verify(args: VerifyArgs, out: &mut impl std::io::Write) -> Result<Outcome> {
    let password = args.password.resolve().await?;
    let (CredentialFile(credential), path) =
        CredentialFile::from_toml_path::<PathBuf>(args.record).await?;

    info!(file = %path.display(), digest = %credential.digest, "verifying credential");
    let matches = credential.verify_async(&password).await?;

    report(matches, out)
}

fn report(matches: bool, out: &mut impl std::io::Write) -> Result<Outcome> {
    if matches {
        writeln!(out, "match")?;
        Ok(Outcome::Match)
    } else {
        writeln!(out, "mismatch")?;
        Ok(Outcome::Mismatch)
    }
}
