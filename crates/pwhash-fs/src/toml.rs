use std::{
    future::Future,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use super::DefaultPathProvider;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("file does not contain valid utf8")]
    InvalidFileUtf8,

    #[error("failed to parse toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize toml: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write {0}: {1}")]
    Write(PathBuf, tokio::io::Error),
}

pub trait FromToml: Sized {
    /// Reads a TOML file from the specified path, or the default path if none is provided.
    /// Returns the parsed value and the path used.
    #[tracing::instrument]
    fn from_toml_path<P>(path: Option<P>) -> impl Future<Output = Result<(Self, P), Error>> + Send
    where
        P: std::fmt::Debug + AsRef<Path> + From<PathBuf> + Send,
        Self: DeserializeOwned + DefaultPathProvider,
    {
        async {
            let path = match path {
                Some(path) => path,
                None => P::from(Self::default_path()),
            };

            info!(file = %path.as_ref().display(), "reading toml");

            let file_contents = tokio::fs::read(path.as_ref())
                .await
                .map_err(|_| Error::FileNotFound(path.as_ref().into()))?;

            let result = toml::from_str(
                &String::from_utf8(file_contents).map_err(|_| Error::InvalidFileUtf8)?,
            )?;
            Ok((result, path))
        }
    }
}

impl<T> FromToml for T where T: DeserializeOwned + DefaultPathProvider {}

pub trait ToToml {
    /// Serializes the value as TOML and writes it to the specified path,
    /// or the default path if none is provided. Returns the path written.
    fn to_toml_path<P>(&self, path: Option<P>) -> impl Future<Output = Result<P, Error>> + Send
    where
        P: std::fmt::Debug + AsRef<Path> + From<PathBuf> + Send,
        Self: Serialize + DefaultPathProvider + Sync,
    {
        async move {
            let path = match path {
                Some(path) => path,
                None => P::from(Self::default_path()),
            };

            info!(file = %path.as_ref().display(), "writing toml");

            let contents = toml::to_string(self)?;
            tokio::fs::write(path.as_ref(), contents)
                .await
                .map_err(|e| Error::Write(path.as_ref().into(), e))?;
            Ok(path)
        }
    }
}

impl<T> ToToml for T where T: Serialize + DefaultPathProvider {}
