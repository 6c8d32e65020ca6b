use serde::{Deserialize, Serialize};

/// Error body the issues API may attach to a non-2xx response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, alias = "message", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    /// Best-effort decode of a response body; `None` when it is not an error object.
    pub fn from_body(body: &str) -> Option<Self> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        if parsed.detail.is_none() && parsed.code.is_none() {
            return None;
        }
        Some(parsed)
    }

    pub fn summary(&self) -> String {
        match (&self.code, &self.detail) {
            (Some(code), Some(detail)) => format!("{code}: {detail}"),
            (None, Some(detail)) => detail.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}
