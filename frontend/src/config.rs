use crate::contact::clock::Millis;

#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Same origin in production
}

/// Timings and storage keys of the contact page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfig {
    pub endpoint_path: String,
    pub storage_key: String,
    pub draft_debounce: Millis,
    pub email_debounce: Millis,
    pub success_display: Millis,
    pub error_display: Millis,
    pub restored_display: Millis,
    pub message_limit: usize,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint_path: "/api/contact".to_string(),
            storage_key: "aico_contact_form_draft".to_string(),
            draft_debounce: 1_000,
            email_debounce: 500,
            success_display: 10_000,
            error_display: 8_000,
            restored_display: 5_000,
            message_limit: 1_000,
        }
    }
}

impl ContactConfig {
    pub fn endpoint(&self) -> String {
        format!("{}{}", get_backend_url(), self.endpoint_path)
    }
}
