//! cubeview: a minimal 3D scene viewer built on three-d.
//!
//! Shows a ground plane with a grid overlay and a shadow-casting cube, lit by
//! an ambient and a directional light and navigable with damped orbit
//! controls. Runs as a desktop window or, compiled to WebAssembly, on a
//! full-page canvas.

pub mod app;
pub mod config;
pub mod controls;
pub mod demo;
pub mod engine;
pub mod error;
pub mod grid;
pub mod scene;
pub mod utils;
#[cfg(target_arch = "wasm32")]
mod web;

pub use config::ViewerConfig;
pub use error::ViewerError;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    utils::set_panic_hook();
}

/// Start the viewer with the stock scene.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn run() -> Result<(), JsValue> {
    start_viewer(ViewerConfig::default())
}

/// Start the viewer with a (partial) options object merged over the defaults,
/// e.g. `{ cube: { color: 0xff0000 }, controls: { enable_damping: false } }`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = runWithConfig)]
pub async fn run_with_config(options: JsValue) -> Result<(), JsValue> {
    let config = match web::options_json(&options).map_err(to_js)? {
        Some(json) => ViewerConfig::from_json(&json)
            .map_err(ViewerError::from)
            .map_err(to_js)?,
        None => ViewerConfig::default(),
    };
    start_viewer(config)
}

#[cfg(target_arch = "wasm32")]
fn start_viewer(config: ViewerConfig) -> Result<(), JsValue> {
    utils::init_logging(&config.debug.log_level);
    app::run(config).map_err(|e| {
        log::error!("{e}");
        to_js(e)
    })
}

#[cfg(target_arch = "wasm32")]
fn to_js(err: ViewerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
