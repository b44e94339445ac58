use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

use crate::error::{Result, ViewerError};

const CANVAS_STYLE: &str = "display: block; width: 100vw; height: 100vh;";

/// Create a full-window canvas and append it to `document.body`.
pub fn create_canvas() -> Result<HtmlCanvasElement> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ViewerError::Canvas("no document available".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| ViewerError::Canvas("document has no body".to_string()))?;

    let canvas = document
        .create_element("canvas")
        .map_err(js_error)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ViewerError::Canvas("created element is not a canvas".to_string()))?;
    canvas.set_attribute("style", CANVAS_STYLE).map_err(js_error)?;
    body.append_child(&canvas).map_err(js_error)?;

    log::debug!("canvas attached to document body");
    Ok(canvas)
}

/// Read a JS options object into its JSON text, `None` when absent.
pub fn options_json(options: &JsValue) -> Result<Option<String>> {
    if options.is_undefined() || options.is_null() {
        return Ok(None);
    }
    let json = js_sys::JSON::stringify(options).map_err(js_error)?;
    Ok(Some(String::from(json)))
}

fn js_error(value: JsValue) -> ViewerError {
    ViewerError::Js(format!("{value:?}"))
}
