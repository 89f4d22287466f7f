use std::sync::Once;

use log::LevelFilter;

/// Settings for the stderr logger installed by [`init_logging`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` directives such as `"warn,tessera_engine::layer=trace"`.
    /// Takes precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    /// Fallback level when neither `env_filter` nor `RUST_LOG` is set.
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self { env_filter: Some(filter.into()), ..Self::default() }
    }

    /// Directives to hand to `env_logger`, or `None` to use `default_level`.
    fn directives(&self) -> Option<String> {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .filter(|d| !d.trim().is_empty())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INSTALL: Once = Once::new();

/// Installs `env_logger` as the `log` backend.
///
/// Only the first call in a process has any effect. A logger installed by the
/// host beforehand is left in place.
pub fn init_logging(config: LoggingConfig) {
    INSTALL.call_once(move || {
        let mut builder = env_logger::Builder::new();
        match config.directives() {
            Some(directives) => builder.parse_filters(&directives),
            None => builder.filter_level(config.default_level),
        };
        builder.write_style(config.write_style);

        match builder.try_init() {
            Ok(()) => log::debug!("logging: env_logger installed"),
            Err(err) => log::debug!("logging: keeping existing logger ({err})"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_ignored() {
        init_logging(LoggingConfig::with_filter("tessera_engine=trace"));
        init_logging(LoggingConfig::default());
        log::trace!("logger still reachable");
    }

    #[test]
    fn explicit_filter_wins() {
        let cfg = LoggingConfig::with_filter("warn");
        assert_eq!(cfg.directives().as_deref(), Some("warn"));
        assert_eq!(cfg.default_level, LevelFilter::Info);
    }

    #[test]
    fn blank_filter_is_treated_as_unset() {
        let cfg = LoggingConfig { env_filter: Some("  ".to_owned()), ..LoggingConfig::default() };
        // Falls through to RUST_LOG, which may be set in the test environment.
        assert_ne!(cfg.directives().as_deref(), Some("  "));
    }
}
