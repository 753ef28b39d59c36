//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Host binaries call this once; the library itself only emits through the
/// `log` facade.
pub fn init() {
    env_logger::init();
}

/// Initialize logging for unit tests, ignoring repeated calls
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
