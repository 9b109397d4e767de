use js_sys::{Function, Reflect};
use log::warn;
use wasm_bindgen::{JsCast, JsValue};

/// Human check sitting next to the form.
pub trait BotVerifier {
    /// Current challenge response, `None` while unsolved.
    fn response_token(&self) -> Option<String>;
    fn reset(&self);
}

/// `window.grecaptcha`, looked up reflectively so the page works without it.
pub struct Grecaptcha {
    handle: JsValue,
}

impl Grecaptcha {
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let handle = Reflect::get(&window, &JsValue::from_str("grecaptcha")).ok()?;
        if handle.is_undefined() || handle.is_null() {
            return None;
        }
        Some(Self { handle })
    }

    fn call(&self, method: &str) -> Result<JsValue, JsValue> {
        let function: Function = Reflect::get(&self.handle, &JsValue::from_str(method))?.dyn_into()?;
        function.call0(&self.handle)
    }
}

impl BotVerifier for Grecaptcha {
    fn response_token(&self) -> Option<String> {
        match self.call("getResponse") {
            Ok(token) => token.as_string().filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("grecaptcha.getResponse failed: {:?}", e);
                None
            }
        }
    }

    fn reset(&self) {
        if let Err(e) = self.call("reset") {
            warn!("grecaptcha.reset failed: {:?}", e);
        }
    }
}
