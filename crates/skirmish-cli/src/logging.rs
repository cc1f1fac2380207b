//! Logger setup for the CLI

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialize the global logger.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug output and the
/// default is info.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // A logger may already be installed (tests)
    let _ = builder.try_init();
}
