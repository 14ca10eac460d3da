use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log verbosity accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            // tracing 沒有 critical，等同 error
            LogLevel::Error | LogLevel::Critical => tracing::Level::ERROR,
        }
    }

    pub fn filter_directive(&self) -> String {
        let level = self.as_tracing_level().to_string().to_lowercase();
        format!("asmt_export={level},warn")
    }
}

fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()))
}

pub fn init_cli_logger(level: LogLevel) {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(level: LogLevel) {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // 給 log 收集器使用
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_maps_to_error() {
        assert_eq!(LogLevel::Critical.as_tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Warning.as_tracing_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_filter_directive_scopes_crate() {
        assert_eq!(LogLevel::Debug.filter_directive(), "asmt_export=debug,warn");
        assert_eq!(LogLevel::default(), LogLevel::Warning);
    }
}
