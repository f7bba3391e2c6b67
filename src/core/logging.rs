//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable. Calling this more than once
/// is harmless; only the first call installs the logger.
///
/// # Example
/// ```
/// terravox::core::logging::init();
/// log::info!("Terrain started");
/// ```
pub fn init() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}

/// Initialize logging for tests, capturing output per test.
pub fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        init_test();
        init();
        init();
        log::info!("logger initialised");
    }
}
