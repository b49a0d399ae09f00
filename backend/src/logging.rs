use std::sync::Once;

/// Logger setup. `env_filter` uses the `env_logger` filter syntax,
/// e.g. "info" or "viewport=debug,backend=trace".
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
}

static INIT: Once = Once::new();

/// Installs the global logger. Calls after the first one are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.target(env_logger::Target::Stderr);
        // tests may already own the global logger
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_init_wins() {
        init_logging(LoggingConfig {
            env_filter: Some("debug".to_string()),
        });
        assert_eq!(log::max_level(), log::LevelFilter::Debug);

        init_logging(LoggingConfig {
            env_filter: Some("error".to_string()),
        });
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
    }
}
