//! Vellum Core
//!
//! This crate contains the ambient services shared by the Vellum crates:
//! logging bootstrap, profiling hooks, configuration and math types.

pub mod config;
pub mod logging;
pub mod math;
pub mod profiling;

pub use config::Config;

/// Initialize logging (and profiling, if requested) from a [`Config`].
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init(config: &Config) {
    logging::try_init_with_filter(&config.log_filter);

    match config.benchmark {
        config::BenchmarkMode::Off => {}
        config::BenchmarkMode::On => puffin::set_scopes_on(true),
        #[cfg(feature = "profiling")]
        config::BenchmarkMode::WithWebserver => {
            profiling::init_profiling(profiling::ProfilingBackend::PuffinHttp)
        }
        #[cfg(not(feature = "profiling"))]
        config::BenchmarkMode::WithWebserver => {
            tracing::warn!("Built without the `profiling` feature, recording scopes locally only");
            puffin::set_scopes_on(true);
        }
    }
}
