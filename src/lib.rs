/// Site Tint - Chrome Extension for per-site page colors and hotel search redirects
/// Built with Rust + WASM + Yew

mod config;
mod domain;
mod error;
mod host;
mod operations;
mod query;
mod rewrite;
mod storage;
mod uri;
pub mod ui;

use wasm_bindgen::prelude::*;

pub use config::{MissingField, RedirectConfig};
pub use error::{ConfigError, HostError, RewriteError};
pub use query::{Param, ParamValue, QueryParams, parse_query, parse_url_params, to_query_string};
pub use rewrite::{RewriteTemplate, TemplateField};

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Parsed query parameters as a JSON object string
#[wasm_bindgen]
pub fn parse_query_json(query: &str) -> String {
    serde_json::to_string(&query::parse_query(query)).unwrap_or_else(|_| "{}".to_string())
}

// Rewritten URL, or an empty string when the URL is not a booking.com search
#[wasm_bindgen]
pub fn rewrite_url(url: &str) -> String {
    rewrite_with(url, &RedirectConfig::default())
}

// Same as `rewrite_url` with a JSON redirect config
#[wasm_bindgen]
pub fn rewrite_url_with_config(url: &str, config_json: &str) -> Result<String, JsValue> {
    let config = RedirectConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(rewrite_with(url, &config))
}

fn rewrite_with(url: &str, config: &RedirectConfig) -> String {
    match rewrite::rewrite_url(url, config) {
        Ok(rewritten) => rewritten.unwrap_or_default(),
        Err(e) => {
            log::warn!("Rewrite failed: {}", e);
            String::new()
        }
    }
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
