use three_d::{Window, WindowSettings};

use crate::config::{ViewerConfig, WindowConfig};
use crate::demo::create_hello_cube;
use crate::engine::Engine;
use crate::error::Result;

/// Open the window (a full-page canvas on the web), build the scene and start
/// the render loop.
///
/// On the desktop this returns once the window is closed. In the browser the
/// loop is driven by `requestAnimationFrame` and this returns immediately.
pub fn run(config: ViewerConfig) -> Result<()> {
    config.validate()?;

    let window = Window::new(window_settings(&config.window)?)?;
    let context = window.gl();

    let mut engine = Engine::new(&context, window.viewport(), &config);
    create_hello_cube(&mut engine, &config.cube);
    log::info!("scene has {} object(s), starting render loop", engine.scene().len());

    window.render_loop(move |frame_input| engine.tick(frame_input));
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn window_settings(config: &WindowConfig) -> Result<WindowSettings> {
    Ok(WindowSettings {
        title: config.title.clone(),
        max_size: config.max_size.map(|[w, h]| (w, h)),
        ..Default::default()
    })
}

#[cfg(target_arch = "wasm32")]
fn window_settings(config: &WindowConfig) -> Result<WindowSettings> {
    Ok(WindowSettings {
        title: config.title.clone(),
        max_size: config.max_size.map(|[w, h]| (w, h)),
        canvas: Some(crate::web::create_canvas()?),
        ..Default::default()
    })
}
