//! Logging initialization and configuration.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initializes the logging subsystem.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies with
/// per-statement sqlx logging damped to warn.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            let json_layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_current_span(true)
                .with_target(true);
            subscriber.with(json_layer).init();
        }
        _ => {
            let pretty_layer = fmt::layer()
                .pretty()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true);
            subscriber.with(pretty_layer).init();
        }
    }
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("{level},sqlx::query=warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_damps_query_logging() {
        let filter = default_filter("debug").to_string();
        assert!(filter.contains("debug"));
        assert!(filter.contains("sqlx::query=warn"));
    }
}
