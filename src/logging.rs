use log::LevelFilter;

/// Initialize logging for the `fillgrid` binary. Uses `Debug` level if `debug_enabled` is set and
/// `Info` otherwise; an explicit `RUST_LOG` overrides both.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    // A logger may already be installed (e.g. by a test harness); keep that one.
    if builder.try_init().is_ok() {
        log::debug!("logger initialized at {level:?} level");
    }
}
