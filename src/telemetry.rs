use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{LogFormat, LoggingConfig};

const FILTER_ENV: &str = "LOG";

#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    pub verbosity: u8,
    pub logging: LoggingConfig,
}

impl TelemetryConfig {
    pub fn new(verbosity: u8, logging: LoggingConfig) -> Self {
        Self { verbosity, logging }
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(config: TelemetryConfig) {
    let filter = build_filter(&config, std::env::var_os(FILTER_ENV).is_some());

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    if config.logging.stderr {
        layers.push(build_stderr_layer(config.logging.stderr_format));
    }
    layers.push(Box::new(filter));

    if Registry::default().with(layers).try_init().is_err() {
        tracing::debug!("subscriber already installed");
    }
}

/// `LOG` wins over the configured filter; both fall back to the `-v` level.
fn build_filter(config: &TelemetryConfig, env_set: bool) -> EnvFilter {
    let builder = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(config.verbosity).into())
        .with_env_var(FILTER_ENV);
    match config.logging.filter.as_deref() {
        Some(directives) if !env_set => builder.parse_lossy(directives),
        _ => builder.from_env_lossy(),
    }
}

fn build_stderr_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Tree => Box::new(
            tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true),
        ),
        LogFormat::Pretty => Box::new(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(true),
        ),
        LogFormat::Compact => Box::new(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(true),
        ),
        LogFormat::Json => Box::new(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(true)
                .with_span_list(true),
        ),
    }
}

fn level_from_verbosity(verbosity: u8) -> tracing::metadata::LevelFilter {
    match verbosity {
        0 => tracing::metadata::LevelFilter::WARN,
        1 => tracing::metadata::LevelFilter::INFO,
        _ => tracing::metadata::LevelFilter::DEBUG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tracing::metadata::LevelFilter;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_from_verbosity(0), LevelFilter::WARN);
        assert_eq!(level_from_verbosity(1), LevelFilter::INFO);
        assert_eq!(level_from_verbosity(5), LevelFilter::DEBUG);
    }

    #[test]
    fn configured_filter_applies_without_env() {
        let config = TelemetryConfig::new(
            0,
            LoggingConfig {
                filter: Some("catalog_edit=trace".into()),
                ..LoggingConfig::default()
            },
        );
        let filter = build_filter(&config, false);
        assert!(filter.to_string().contains("catalog_edit=trace"));
    }
}
