//! Vibration feedback

use wasm_bindgen::JsValue;

/// `navigator.vibrate`, detected once; a no-op where unsupported
pub struct Haptics {
    navigator: Option<web_sys::Navigator>,
    pub enabled: bool,
}

impl Haptics {
    pub fn new(enabled: bool) -> Self {
        let navigator = web_sys::window()
            .map(|w| w.navigator())
            .filter(|n| js_sys::Reflect::has(n, &JsValue::from_str("vibrate")).unwrap_or(false));
        if navigator.is_none() {
            log::info!("Vibration not supported");
        }
        Self { navigator, enabled }
    }

    pub fn vibrate(&self, duration_ms: u32) {
        if !self.enabled {
            return;
        }
        if let Some(navigator) = &self.navigator {
            navigator.vibrate_with_duration(duration_ms);
        }
    }
}
