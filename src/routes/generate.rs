//! Presentation generation request intake.
//!
//! Validates the prompt and acknowledges the request. No generation happens
//! here; the response echoes what was received.

use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::instrument;

use super::timestamp;
use crate::error::ApiError;

pub const PROMPT_REQUIRED: &str = "Prompt is required";

pub const GENERATE_ACK_MESSAGE: &str = "Presentation generation request received";

/// Parsed generation request. `options` is opaque and never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: Option<Value>,
    pub options: Value,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            prompt: None,
            options: Value::Object(Map::new()),
        }
    }
}

impl GenerateRequest {
    /// Parse a request body.
    ///
    /// Bodies not declared as JSON, empty bodies and JSON arrays carry no
    /// fields. A JSON body must start with `{` or `[`; anything else, including
    /// whitespace only, is malformed.
    pub fn from_body(headers: &HeaderMap, body: &[u8]) -> Result<Self, ApiError> {
        if !is_json_content_type(headers) || body.is_empty() {
            return Ok(Self::default());
        }

        match body.iter().copied().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{' | b'[') => {}
            Some(first) => {
                return Err(ApiError::NotJsonContainer(
                    String::from_utf8_lossy(&[first]).into_owned(),
                ));
            }
            None => return Err(ApiError::NotJsonContainer("end of input".to_string())),
        }

        match serde_json::from_slice::<Value>(body)? {
            Value::Object(mut fields) => Ok(Self {
                prompt: fields.remove("prompt"),
                options: fields
                    .remove("options")
                    .unwrap_or_else(|| Value::Object(Map::new())),
            }),
            _ => Ok(Self::default()),
        }
    }

    /// The prompt, if present and truthy.
    pub fn validated_prompt(self) -> Result<(Value, Value), ApiError> {
        match self.prompt {
            Some(prompt) if is_truthy(&prompt) => Ok((prompt, self.options)),
            _ => Err(ApiError::validation(PROMPT_REQUIRED)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub prompt: Value,
    pub options: Value,
    pub timestamp: String,
    pub message: &'static str,
}

/// Generation request handler.
///
/// Body read and parse failures become 500 `Internal server error` (logged by
/// [`ApiError`]); a missing prompt is a 400.
#[instrument(name = "generate::generate", skip_all)]
pub async fn generate(
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request = GenerateRequest::from_body(&headers, &body?)?;

    let (prompt, options) = request.validated_prompt()?;
    tracing::debug!("Generation request accepted");

    Ok(Json(GenerateResponse {
        success: true,
        prompt,
        options,
        timestamp: timestamp(),
        message: GENERATE_ACK_MESSAGE,
    }))
}

/// JavaScript-style truthiness: `null`, `false`, zero and `""` are falsy;
/// every other value, including empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `application/json`, parameters and case ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    #[test]
    fn test_is_truthy_falsy_values() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
    }

    #[test]
    fn test_is_truthy_truthy_values() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(" ")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        assert!(is_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("Application/JSON"));
        assert!(is_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/merge-patch+json"));
        assert!(!is_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json_content_type(&headers));
    }

    #[test]
    fn test_from_body_extracts_fields() {
        let body = br#"{"prompt":"Slides about Rust","options":{"theme":"dark","slides":5}}"#;
        let request = GenerateRequest::from_body(&json_headers(), body).unwrap();
        assert_eq!(request.prompt, Some(json!("Slides about Rust")));
        assert_eq!(request.options, json!({"theme": "dark", "slides": 5}));
    }

    #[test]
    fn test_from_body_defaults_options_to_empty_object() {
        let request = GenerateRequest::from_body(&json_headers(), br#"{"prompt":"x"}"#).unwrap();
        assert_eq!(request.options, json!({}));
    }

    #[test]
    fn test_from_body_keeps_explicit_null_options() {
        let body = br#"{"prompt":"x","options":null}"#;
        let request = GenerateRequest::from_body(&json_headers(), body).unwrap();
        assert_eq!(request.options, Value::Null);
    }

    #[test]
    fn test_from_body_without_json_content_type_is_empty() {
        let request = GenerateRequest::from_body(&HeaderMap::new(), br#"{"prompt":"x"}"#).unwrap();
        assert_eq!(request, GenerateRequest::default());
    }

    #[test]
    fn test_from_body_empty_and_arrays_are_empty() {
        for body in ["", "[1,2]", "  [{\"prompt\":\"x\"}]"] {
            let request = GenerateRequest::from_body(&json_headers(), body.as_bytes()).unwrap();
            assert_eq!(request, GenerateRequest::default());
        }
    }

    #[test]
    fn test_from_body_rejects_top_level_primitives() {
        for body in ["42", "\"hello\"", "null", "true", " \n\t", "  false"] {
            let err = GenerateRequest::from_body(&json_headers(), body.as_bytes()).unwrap_err();
            assert!(matches!(err, ApiError::NotJsonContainer(_)), "body: {:?}", body);
        }
    }

    #[test]
    fn test_from_body_preserves_option_key_order() {
        let body = br#"{"prompt":"x","options":{"zeta":1,"alpha":2,"mid":{"b":1,"a":2}}}"#;
        let request = GenerateRequest::from_body(&json_headers(), body).unwrap();
        assert_eq!(
            serde_json::to_string(&request.options).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":{"b":1,"a":2}}"#
        );
    }

    #[test]
    fn test_from_body_malformed_is_error() {
        let err = GenerateRequest::from_body(&json_headers(), b"{\"prompt\":").unwrap_err();
        assert!(matches!(err, ApiError::MalformedJson(_)));
    }

    #[test]
    fn test_validated_prompt_rejects_missing() {
        let err = GenerateRequest::default().validated_prompt().unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == PROMPT_REQUIRED));
    }

    #[test]
    fn test_validated_prompt_passes_non_string_truthy_prompt() {
        let request = GenerateRequest {
            prompt: Some(json!(["outline", "slides"])),
            options: json!({}),
        };
        let (prompt, options) = request.validated_prompt().unwrap();
        assert_eq!(prompt, json!(["outline", "slides"]));
        assert_eq!(options, json!({}));
    }
}
