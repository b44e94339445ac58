//! cubeview desktop entry point

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), cubeview::ViewerError> {
    use cubeview::ViewerConfig;

    let loaded = ViewerConfig::load();
    let level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    cubeview::utils::init_logging(&level);

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        ViewerConfig::default()
    });

    cubeview::app::run(config).inspect_err(|e| log::error!("{e}"))
}

// wasm-pack builds only the library (the web page calls its `run` export);
// this stub keeps `cargo build --target wasm32-unknown-unknown` working for
// the whole package.
#[cfg(target_arch = "wasm32")]
fn main() {}
