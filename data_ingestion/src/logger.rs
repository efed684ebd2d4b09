use env_logger::Env;

/// Installs the process-wide logger. `RUST_LOG` overrides the default
/// `info` filter. Calling it twice is harmless.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_target(true)
        .try_init();
}
