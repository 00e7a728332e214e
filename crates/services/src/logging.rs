use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable read by [`init_tracing_from_env`].
pub const LOG_LEVEL_ENV: &str = "LEARN_LOG";

/// Install a stdout `tracing` subscriber filtered by `log_level` (an `EnvFilter` directive).
///
/// Invalid directives fall back to `info`. Returns false if a global subscriber was
/// already installed.
pub fn init_tracing(log_level: &str) -> bool {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

/// [`init_tracing`] with the level taken from `LEARN_LOG`, defaulting to `info`.
pub fn init_tracing_from_env() -> bool {
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());
    init_tracing(&level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_refused() {
        let first = init_tracing("services=debug,learn_core=debug");
        let second = init_tracing("not a = valid [directive");
        assert!(first);
        assert!(!second);
    }
}
