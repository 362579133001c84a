//! Logger setup for the worker: `console_log` on wasm32, `env_logger`
//! everywhere else (native tests).

use log::LevelFilter;

/// Parse a level name ("off", "error", ... "trace"). Unknown names mean `info`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

#[cfg(target_arch = "wasm32")]
fn install(filter: LevelFilter) -> Result<(), log::SetLoggerError> {
    let level = filter.to_level().unwrap_or(log::Level::Error);
    console_log::init_with_level(level)
}

#[cfg(not(target_arch = "wasm32"))]
fn install(filter: LevelFilter) -> Result<(), log::SetLoggerError> {
    use std::io::Write;

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[initiative] {} {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .is_test(cfg!(test))
        .try_init()
}

/// Install the logger. Safe to call more than once; later calls only
/// adjust the level.
pub fn init(level: &str) {
    let filter = parse_level(level);
    if install(filter).is_err() {
        log::debug!("logger already installed");
    }
    log::set_max_level(filter);
}
