// Utility helpers shared by the model and the components

#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

// JS imports are unavailable off wasm (unit tests)
#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    let _ = msg;
}

pub fn format_scale(scale: f64) -> String {
    format!("{:.2}x", scale)
}

pub fn format_bytes(len: usize) -> String {
    if len == 1 {
        "1 byte".to_string()
    } else {
        format!("{} bytes", len)
    }
}
