use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs the crate logger at `Info` for `chainkv` modules.
pub fn initialize_logger() {
    initialize_logger_with(LevelFilter::Info);
}

/// Installs the crate logger with `level` for `chainkv` modules.
///
/// Only the first call in a process takes effect. `RUST_LOG` is parsed last,
/// so it overrides `level`.
pub fn initialize_logger_with(level: LevelFilter) {
    // Use call_once_force to recover if an earlier initialization attempt panicked.
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("chainkv", level)
            .format_timestamp_millis()
            .format_module_path(true)
            .parse_default_env();

        // Avoid panicking if the logger was already initialized elsewhere.
        let _ = builder.try_init();
    });
}
