use std::borrow::Cow;

use crate::logging::DEFAULT_FILTER;

/// Configuration for the Vellum crates.
#[derive(Debug, Clone)]
pub struct Config {
    pub benchmark: BenchmarkMode,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: Cow<'static, str>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            benchmark: BenchmarkMode::Off,
            log_filter: Cow::Borrowed(DEFAULT_FILTER),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkMode {
    /// Benchmarking is disabled
    Off,
    /// Profiling scopes are recorded and can be read from the global profiler
    On,
    /// Profiling scopes are recorded and served to `puffin_viewer` over HTTP
    WithWebserver,
}
