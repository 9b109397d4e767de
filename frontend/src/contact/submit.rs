use std::collections::BTreeMap;

use gloo_net::http::Request;
use log::{error, info};
use serde::{Deserialize, Serialize};

use super::error::SubmissionError;

/// Flat field map plus the bot check token, posted as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recaptcha: Option<String>,
}

impl ContactRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

pub async fn submit_contact(
    endpoint: &str,
    request: &ContactRequest,
) -> Result<SubmissionOutcome, SubmissionError> {
    info!(
        "Submitting contact form ({}) to {}",
        request.field("serviceType").unwrap_or("no service"),
        endpoint
    );
    let response = Request::post(endpoint)
        .json(request)
        .map_err(|e| SubmissionError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| {
            error!("Network error: {}", e);
            SubmissionError::Network(e.to_string())
        })?;

    if !response.ok() {
        error!("Contact submission failed with status: {}", response.status());
        return Err(SubmissionError::Status(response.status()));
    }

    response
        .json::<SubmissionOutcome>()
        .await
        .map_err(|e| SubmissionError::Decode(e.to_string()))
}
