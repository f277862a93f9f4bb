use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{id} is not a canvas: {:?}", e)))
}

/// Match the canvas's internal pixel size to its CSS size times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Window inner size in CSS pixels, or None while either side is zero.
pub fn viewport_size(window: &web::Window) -> Option<(f64, f64)> {
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    (w > 0.0 && h > 0.0).then_some((w, h))
}

/// Query string of the current page, without the leading `?`.
pub fn location_query() -> String {
    web::window()
        .and_then(|w| w.location().search().ok())
        .map(|s| s.trim_start_matches('?').to_string())
        .unwrap_or_default()
}
