use thiserror::Error;

/// Fallback shown when a submission fails without any usable message.
pub const GENERIC_FAILURE: &str = "Bir hata oluştu. Lütfen tekrar deneyin.";
/// Fallback shown when the endpoint answers `success: false` without a message.
pub const REJECTED_FAILURE: &str = "Form gönderilemedi.";

/// Inline, per-field failure. `Display` is the exact text shown under the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} zorunludur.")]
    Required { label: &'static str },
    #[error("{0}")]
    Unchecked(&'static str),
    #[error("{0}")]
    Pattern(&'static str),
    #[error("En az {min} karakter olmalıdır.")]
    TooShort { min: usize },
    #[error("En fazla {max} karakter olabilir.")]
    TooLong { max: usize },
    #[error("Lütfen robot olmadığınızı doğrulayın.")]
    NotVerified,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("{0}")]
    Network(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Rejected(String),
}

impl SubmissionError {
    /// Text for the global error notice.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

/// Draft cache failures. Always logged and swallowed by the caller.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("local storage access failed: {0}")]
    Access(String),
    #[error("draft could not be (de)serialized: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("tracker {0} is not loaded")]
    Missing(&'static str),
    #[error("tracker call failed: {0}")]
    Call(String),
}
