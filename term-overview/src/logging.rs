//! Logging utilities and configuration for overview reports.
//!
//! Report generation logs through `tracing`. [`LogConfig`] controls how much
//! detail the executor emits, and [`setup`] installs a `tracing-subscriber`
//! pipeline for applications that do not configure one themselves.

use tracing::Level;

/// Logging configuration for report generation.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level for overview components
    pub base_level: Level,
    /// Whether to log every computed (group, column) result
    pub log_metric_details: bool,
    /// Whether to log executor operations such as completed requests
    pub log_data_operations: bool,
    /// Maximum length for logged field values such as group keys
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_metric_details: false,
            log_data_operations: true,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_metric_details: true,
            log_data_operations: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for production with lowest overhead.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_metric_details: false,
            log_data_operations: false,
            max_field_length: 128,
        }
    }

    /// Returns true when `base_level` lets debug events through.
    pub fn debug_enabled(&self) -> bool {
        self.base_level >= Level::DEBUG
    }
}

/// Debug logging that is skipped entirely unless the config allows debug output.
#[macro_export]
macro_rules! perf_debug {
    ($config:expr, $($arg:tt)*) => {
        if $config.debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Logs per-column metric results when enabled.
#[macro_export]
macro_rules! log_metric {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_metric_details {
            tracing::debug!($($arg)*);
        }
    };
}

/// Logs executor operations when enabled.
#[macro_export]
macro_rules! log_data_op {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_data_operations {
            tracing::info!($($arg)*);
        }
    };
}

/// Truncates a string to the maximum field length if needed.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    if value.len() <= max_length {
        return value.to_string();
    }
    let mut end = max_length;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated)", &value[..end])
}

/// Utilities for installing a `tracing-subscriber` pipeline.
pub mod setup {
    use tracing::Level;

    /// Configuration for the logging pipeline.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for the application
        pub level: Level,
        /// Log level for `term_overview` specifically
        pub overview_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                overview_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for production use.
        pub fn production() -> Self {
            Self {
                level: Level::WARN,
                overview_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                overview_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        /// Sets the log level for the application.
        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        /// Sets the log level for overview components.
        pub fn with_overview_level(mut self, level: Level) -> Self {
            self.overview_level = level;
            self
        }

        /// Sets whether to use JSON output format.
        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                format!(
                    "{},term_overview={}",
                    self.level.as_str().to_lowercase(),
                    self.overview_level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Installs a global subscriber. `RUST_LOG` takes precedence over the config filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use term_overview::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::development().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer().json().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::setup::LoggingConfig;
    use super::*;

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.base_level, Level::INFO);
        assert!(!config.log_metric_details);
        assert!(config.log_data_operations);
        assert_eq!(config.max_field_length, 256);
    }

    #[test]
    fn test_log_config_presets() {
        let verbose = LogConfig::verbose();
        assert_eq!(verbose.base_level, Level::DEBUG);
        assert!(verbose.log_metric_details);

        let production = LogConfig::production();
        assert_eq!(production.base_level, Level::WARN);
        assert!(!production.log_data_operations);
    }

    #[test]
    fn test_debug_gate_follows_verbosity() {
        assert!(!LogConfig::production().debug_enabled());
        assert!(!LogConfig::default().debug_enabled());
        assert!(LogConfig::verbose().debug_enabled());

        let trace = LogConfig {
            base_level: Level::TRACE,
            ..LogConfig::default()
        };
        assert!(trace.debug_enabled());
    }

    #[test]
    fn test_truncate_field() {
        assert_eq!(truncate_field("hello", 10), "hello");
        assert_eq!(
            truncate_field("this is a very long group key", 10),
            "this is a ...(truncated)"
        );
        // never splits a multi-byte character
        assert_eq!(truncate_field("ééé", 3), "é...(truncated)");
    }

    #[test]
    fn test_env_filter() {
        assert_eq!(LoggingConfig::default().env_filter(), "info,term_overview=debug");
        assert_eq!(
            LoggingConfig::production().with_env_filter("warn").env_filter(),
            "warn"
        );
    }
}
