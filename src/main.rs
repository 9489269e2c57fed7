//! SuomiSF Frontend Entry Point

mod boot;
mod commands;
mod components;
mod config;
mod context;
mod dom;
mod enhance;
mod error;
mod models;
mod select;
mod store;

use reactive_stores::Store;
use wasm_bindgen::prelude::*;

use config::PageConfig;
use context::AppContext;
use store::UiState;

fn main() {
    console_error_panic_hook::set_once();

    let config = PageConfig::from_document();
    if let Err(err) = console_logger::init(config.log_level, console_logger::DEFAULT_CAPACITY) {
        web_sys::console::warn_1(&format!("logger already installed: {}", err).into());
    }
    log::info!(
        "starting (item {:?}, csrf token {})",
        config.item_id,
        if config.csrf_token.is_some() { "present" } else { "missing" }
    );

    commands::set_csrf_token(config.csrf_token.clone());
    let ctx = AppContext::new(config, Store::new(UiState::default()));
    boot::attach_all(ctx);
}

/// Recent log lines, callable from the devtools console as
/// `suomisfLogHistory()` when reporting a problem.
#[wasm_bindgen(js_name = suomisfLogHistory)]
pub fn log_history() -> JsValue {
    serde_wasm_bindgen::to_value(&console_logger::recent()).unwrap_or(JsValue::NULL)
}
