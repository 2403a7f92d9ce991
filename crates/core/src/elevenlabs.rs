//! Pieces shared by the ElevenLabs speech-to-text and text-to-speech clients.

use serde_json::Value;

/// Header carrying the account API key.
pub(crate) const API_KEY_HEADER: &str = "xi-api-key";

/// Extracts a readable message from an ElevenLabs error body.
///
/// Errors arrive either as `{"detail": {"status": .., "message": ..}}`,
/// `{"detail": "text"}`, or validation lists `{"detail": [{"msg": ..}]}`.
pub(crate) fn error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.chars().take(200).collect();
    };

    match value.get("detail") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Object(detail)) => detail
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Value::Object(detail.clone()).to_string()),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.chars().take(200).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_object() {
        let body = r#"{"detail":{"status":"invalid_api_key","message":"Invalid API key"}}"#;
        assert_eq!(error_detail(body), "Invalid API key");
    }

    #[test]
    fn test_error_detail_string() {
        assert_eq!(error_detail(r#"{"detail":"Quota exceeded"}"#), "Quota exceeded");
    }

    #[test]
    fn test_error_detail_validation_list() {
        let body = r#"{"detail":[{"loc":["body","file"],"msg":"field required"},{"msg":"bad model"}]}"#;
        assert_eq!(error_detail(body), "field required; bad model");
    }

    #[test]
    fn test_error_detail_non_json() {
        assert_eq!(error_detail("Bad Gateway"), "Bad Gateway");
    }
}
