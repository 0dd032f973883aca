//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging with a default level that `RUST_LOG` overrides when set.
///
/// Unknown level strings fall back to `info`. Calling this twice is harmless.
pub fn init_with_level(level: &str) {
    let _ = builder(env_logger::DEFAULT_FILTER_ENV, level).try_init();
}

fn builder(filter_var: &str, level: &str) -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(filter_var, default_filter(level)))
}

fn default_filter(level: &str) -> &str {
    if level.parse::<log::LevelFilter>().is_ok() {
        level
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn test_level_applies_without_env() {
        std::env::remove_var("SCENE_ENGINE_LOG_UNSET");
        let logger = builder("SCENE_ENGINE_LOG_UNSET", "debug").build();
        assert_eq!(logger.filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_env_overrides_level() {
        std::env::set_var("SCENE_ENGINE_LOG_SET", "warn");
        let logger = builder("SCENE_ENGINE_LOG_SET", "trace").build();
        assert_eq!(logger.filter(), LevelFilter::Warn);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        assert_eq!(default_filter("loud"), "info");
        assert_eq!(default_filter("error"), "error");
        std::env::remove_var("SCENE_ENGINE_LOG_FALLBACK");
        let logger = builder("SCENE_ENGINE_LOG_FALLBACK", "loud").build();
        assert_eq!(logger.filter(), LevelFilter::Info);
    }
}
