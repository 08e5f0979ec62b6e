use tracing_subscriber::EnvFilter;

static INIT_LOGGER: std::sync::Once = std::sync::Once::new();

/// Install the global tracing subscriber.
///
/// Safe to call from every plugin entry point; only the first call does
/// anything. `RUST_LOG` overrides the default filter, which keeps the host
/// quiet and this crate chatty.
pub fn init_logger_once() {
    INIT_LOGGER.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,castnotes=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logger_once();
        init_logger_once();
    }
}
