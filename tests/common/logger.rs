use chainkv::common::logger::initialize_logger_with;
use log::LevelFilter;

/// Keeps test output quiet; set `RUST_LOG=chainkv=debug` to see chain dumps.
pub fn init_test_logger() {
    initialize_logger_with(LevelFilter::Warn);
}
