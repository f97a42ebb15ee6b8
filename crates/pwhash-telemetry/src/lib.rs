use config::{Config, Format};
use tracing::{
    info,
    subscriber::{DefaultGuard, SetGlobalDefaultError},
};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
    Layer,
    Registry,
};

pub mod config;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to initialize telemetry: {0}")]
    Initialization(#[from] TryInitError),

    #[error("failed to initialize telemetry: {0}")]
    InitializationSetGlobal(#[from] SetGlobalDefaultError),
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Logging setup for the application.
///
/// Events are written to stderr so that stdout only carries command output.
pub struct Telemetry {
    config: Config,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Telemetry {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Temporary stderr logging used before the configuration is loaded.
    #[must_use]
    pub fn stderr() -> DefaultGuard {
        tracing::subscriber::set_default(
            Registry::default()
                .with(Self::fmt_layer(&Config::default()))
                .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())),
        )
    }

    /// Initialize the global tracing subscriber.
    ///
    /// # Errors
    /// If a global default subscriber has already been set, this function will return an error.
    pub fn init(self) -> Result<Self, Error> {
        Registry::default()
            .with(Self::fmt_layer(&self.config))
            .with(self.get_filter())
            .try_init()?;

        info!(config = %self.config, "initialized global telemetry");
        Ok(self)
    }

    /// Initialize a tracing subscriber for the current thread only.
    ///
    /// # Errors
    /// Currently infallible.
    pub fn init_scoped(self) -> Result<(Self, DefaultGuard), Error> {
        let guard = tracing::subscriber::set_default(
            Registry::default()
                .with(Self::fmt_layer(&self.config))
                .with(self.get_filter()),
        );

        info!(config = %self.config, "initialized scoped telemetry");
        Ok((self, guard))
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn get_filter(&self) -> EnvFilter {
        let mut filter = self.config.filter.clone();
        filter.push(self.config.level.clone());

        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter.join(",")))
    }

    fn fmt_layer(config: &Config) -> BoxedLayer {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE);

        match config.format {
            Format::Full => layer
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .boxed(),
            Format::Compact => layer.compact().boxed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::config::{Config, Format};

    #[tracing::instrument]
    fn sum(a: i32, b: i32) -> i32 {
        a + b
    }

    #[test]
    fn test_default_init() {
        let telemetry = super::Telemetry::default().init_scoped().inspect_err(|e| {
            tracing::error!("Failed to initialize telemetry: {}", e);
        });
        assert!(telemetry.is_ok());

        tracing::info!(iterations = 1, "Test event");

        sum(1, 1);
    }

    #[test]
    fn test_stderr_scoped() {
        let _guard = super::Telemetry::stderr();

        tracing::warn!("Test event");

        sum(1, 1);
    }

    #[test]
    fn test_full_format_scoped() {
        let config = Config {
            level: "debug".to_string(),
            filter: vec!["pwhash_crypto=trace".to_string()],
            format: Format::Full,
            ansi: false,
        };

        let (telemetry, _guard) = super::Telemetry::new(&config).init_scoped().unwrap();
        assert_eq!(telemetry.config().format, Format::Full);

        tracing::debug!(keylen = 64, "Test event");

        sum(1, 1);
    }
}
