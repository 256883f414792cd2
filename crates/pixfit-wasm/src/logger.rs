//! Routes the `log` facade to the browser console.
//!
//! Core code logs through `log::warn!` and friends; installing `wasm_logger`
//! in the start hook makes those messages (JPEG fallbacks, kept originals)
//! show up in devtools at the matching console level.

use log::LevelFilter;
use wasm_bindgen::prelude::*;

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

/// Install the console logger.
///
/// The logger itself passes every level; filtering happens through
/// `log::max_level` so [`set_log_level`] can change it later.
pub(crate) fn init() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
    log::set_max_level(DEFAULT_LEVEL);
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse().ok()
}

/// Set the console log level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {level}")))?;
    log::set_max_level(filter);
    Ok(())
}
