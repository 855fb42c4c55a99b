use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,vellum_render=debug";

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over [`DEFAULT_FILTER`].
///
/// # Panics
/// Panics if a global subscriber has already been installed.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .init();
}

/// Install the global fmt subscriber unless one is already present.
///
/// Returns `false` when another subscriber was installed first, which is the
/// normal case for the second test in a test binary.
pub fn try_init_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter))
        .try_init()
        .is_ok()
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_is_repeatable() {
        try_init_with_filter("warn");
        assert!(!try_init_with_filter("warn"));
    }
}
