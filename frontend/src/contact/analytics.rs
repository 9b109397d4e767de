use js_sys::{Array, Function, Reflect};
use log::info;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use super::error::AnalyticsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Success { service: String },
    Failure { message: String },
}

impl FormEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FormEvent::Success { .. } => "contact_form_success",
            FormEvent::Failure { .. } => "contact_form_error",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FormEvent::Success { service } => service,
            FormEvent::Failure { message } => message,
        }
    }
}

/// Fire-and-forget event sink. Errors are logged by the caller and never
/// reach the form.
pub trait Analytics {
    fn track(&self, event: &FormEvent) -> Result<(), AnalyticsError>;
}

pub struct ConsoleAnalytics;

impl Analytics for ConsoleAnalytics {
    fn track(&self, event: &FormEvent) -> Result<(), AnalyticsError> {
        info!("Form event tracked: {} {}", event.name(), event.label());
        Ok(())
    }
}

#[derive(Serialize)]
struct GtagParams<'a> {
    event_category: &'static str,
    event_label: &'a str,
    value: u32,
}

#[derive(Serialize)]
struct PixelParams {
    content_name: &'static str,
    content_category: &'static str,
    value: u32,
    currency: &'static str,
}

/// Google Analytics and Facebook Pixel, whichever of them is loaded.
pub struct BrowserAnalytics;

impl BrowserAnalytics {
    fn global(name: &'static str) -> Result<Function, AnalyticsError> {
        let window = web_sys::window().ok_or(AnalyticsError::Missing(name))?;
        Reflect::get(&window, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or(AnalyticsError::Missing(name))
    }

    fn call(name: &'static str, args: Vec<JsValue>) -> Result<(), AnalyticsError> {
        let function = Self::global(name)?;
        let args: Array = args.into_iter().collect();
        function
            .apply(&JsValue::NULL, &args)
            .map(|_| ())
            .map_err(|e| AnalyticsError::Call(format!("{}: {:?}", name, e)))
    }

    fn to_js<T: Serialize>(value: &T) -> Result<JsValue, AnalyticsError> {
        serde_wasm_bindgen::to_value(value).map_err(|e| AnalyticsError::Call(e.to_string()))
    }
}

impl Analytics for BrowserAnalytics {
    fn track(&self, event: &FormEvent) -> Result<(), AnalyticsError> {
        let success = matches!(event, FormEvent::Success { .. });

        let gtag = Self::to_js(&GtagParams {
            event_category: "Form",
            event_label: event.label(),
            value: 1,
        })
        .and_then(|params| {
            Self::call("gtag", vec!["event".into(), event.name().into(), params])
        });

        let pixel = Self::to_js(&PixelParams {
            content_name: "Contact Form",
            content_category: "Lead Generation",
            value: u32::from(success),
            currency: "TRY",
        })
        .and_then(|params| {
            let kind = if success { "Lead" } else { "CustomEvent" };
            Self::call("fbq", vec!["track".into(), kind.into(), params])
        });

        // Either tracker being absent is normal; report only when both fail.
        match (gtag, pixel) {
            (Err(e), Err(_)) => Err(e),
            _ => Ok(()),
        }
    }
}
