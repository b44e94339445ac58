pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    #[cfg(all(target_arch = "wasm32", feature = "console_error_panic_hook"))]
    console_error_panic_hook::set_once();
}

/// Install the platform logger. `level` is the default filter; on the desktop
/// `RUST_LOG` takes precedence over it.
pub fn init_logging(level: &str) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let env = env_logger::Env::default().default_filter_or(level);
        if env_logger::Builder::from_env(env).try_init().is_err() {
            log::debug!("logger already installed");
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        let level = level.parse::<log::Level>().unwrap_or(log::Level::Info);
        if console_log::init_with_level(level).is_err() {
            log::debug!("logger already installed");
        }
    }
}
