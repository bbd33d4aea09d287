//! Logger set-up for the LAPSE binaries
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::LevelFilter;

/// Initialize `env_logger` with `info` as the default level
///
/// `RUST_LOG` overrides the default, e.g. `RUST_LOG=lapse_core=debug` to
/// trace every frame.
pub fn init_logger() {
    init_logger_with_level(LevelFilter::Info)
}

pub fn init_logger_with_level(default_level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_target(true)
        .format_timestamp_millis()
        .init();
}
