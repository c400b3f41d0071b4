use env_logger::Builder;
use log::LevelFilter;
pub use log::{debug, info, warn};

/// Install an `env_logger` logger, `RUST_LOG` can still refine the filter
pub fn init() {
    let mut builder = Builder::from_default_env();
    builder.filter(None, LevelFilter::Info).init();
}

/// Install a `Debug` level test logger, does nothing when a logger is already installed
pub fn try_init() {
    let _ = Builder::from_default_env()
        .filter(None, LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
