use serde::{Deserialize, Serialize};

/// Error body returned by the verification service on non-2xx responses.
///
/// `detail` is usually a string but validation failures carry a structured
/// list, so it is kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ApiErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: serde_json::Value::String(detail.into()),
        }
    }

    /// Human-readable detail, if the body carried one.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
                    .map(str::to_string)
                    .collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"detail": "model not loaded"}"#).expect("body");
        assert_eq!(body.message().as_deref(), Some("model not loaded"));
    }

    #[test]
    fn validation_detail_list_joins_messages() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"detail": [{"loc": ["body", "sfreq"], "msg": "field required"},
                           {"loc": ["body", "eeg_raw"], "msg": "value is not a list"}]}"#,
        )
        .expect("body");
        assert_eq!(
            body.message().as_deref(),
            Some("field required; value is not a list")
        );
    }

    #[test]
    fn missing_detail_yields_none() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error": "boom"}"#).expect("body");
        assert_eq!(body.message(), None);
    }
}
